//! Describe SQLite tables declaratively, get their `CREATE TABLE` statements
//! and reference strings, and list the `$name` parameters a query expects.
//!
//! ```
//! use tablesql::Table;
//! use tablesql::TableOptions;
//!
//! let users = Table::new(
//!     TableOptions::new("users")
//!         .column("name", "text not null")
//!         .column("pass", "text not null")
//!         .primary_keys(vec!["name"]),
//! );
//! let posts = Table::new(
//!     TableOptions::new("posts")
//!         .column("id", "int not null")
//!         .column("author", "text not null")
//!         .primary_keys(vec!["id"])
//!         .foreign_key(vec!["author"], users.grouped_columns(&["name"])),
//! );
//! assert_eq!(
//!     posts.init(),
//!     "CREATE TABLE IF NOT EXISTS posts (id int not null,author text not null,\
//!      PRIMARY KEY(id),FOREIGN KEY(author) REFERENCES users(name))"
//! );
//!
//! let query = tablesql::Query::new(format!("select * from {} where name = $name", users)).unwrap();
//! assert!(query.parameters().contains("name"));
//! ```

pub mod command_line_interface;
pub mod configuration;
pub mod constants;
pub mod error;
pub mod query;
pub mod query_annotator;
pub mod table;
pub mod table_ddl;
pub mod table_options;

pub use error::Error;
pub use error::ErrorKind;
pub use error::Result;
pub use query::Query;
pub use query::Value;
pub use query_annotator::extract_parameters;
pub use table::Table;
pub use table_options::ColumnDefinition;
pub use table_options::ForeignKeyConstraint;
pub use table_options::TableOptions;
