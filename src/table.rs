use crate::error::Error;
use crate::error::ErrorKind;
use crate::error::Result;
use crate::table_ddl::create_table_statement;
use crate::table_options::TableOptions;
use log::debug;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum ReferenceKey {
    Qualified(String),
    Bare(String),
    Grouped(String),
}

/// A declared table: its `CREATE TABLE` statement, its column list,
/// and the reference strings used to mention it from query text.
///
/// Reference strings are computed on first access and cached per descriptor,
/// so repeated accesses hand out the same `Arc<str>`.
#[derive(Debug)]
pub struct Table {
    options: TableOptions,
    init: String,
    columns: Vec<String>,
    references: RwLock<HashMap<ReferenceKey, Arc<str>>>,
}

impl Table {
    /// Build a descriptor without checking the options.
    pub fn new(options: TableOptions) -> Table {
        let init = create_table_statement(&options);
        debug!("Declared table {}: {}", options.name, init);
        let columns = options.schema.iter().map(|c| c.name.clone()).collect();
        Table {
            options,
            init,
            columns,
            references: RwLock::new(HashMap::new()),
        }
    }

    /// Like [`Table::new`], but runs [`TableOptions::validate`] first.
    pub fn new_checked(options: TableOptions) -> Result<Table> {
        options.validate()?;
        Ok(Table::new(options))
    }

    pub fn name(&self) -> &str {
        &self.options.name
    }

    /// The `CREATE TABLE IF NOT EXISTS` statement, generated once at construction.
    pub fn init(&self) -> &str {
        &self.init
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// `name(col1,col2)`, as used in `REFERENCES` clauses.
    pub fn grouped_columns<I, S>(&self, columns: I) -> Arc<str>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = join_columns(columns);
        self.reference(ReferenceKey::Grouped(joined.clone()), || {
            format!("{}({})", self.name(), joined)
        })
    }

    /// `name.col`
    pub fn qualified_column(&self, column: &str) -> Arc<str> {
        self.reference(ReferenceKey::Qualified(column.to_string()), || {
            format!("{}.{}", self.name(), column)
        })
    }

    /// The column name itself, unqualified.
    pub fn bare_column(&self, column: &str) -> Arc<str> {
        self.reference(ReferenceKey::Bare(column.to_string()), || column.to_string())
    }

    pub fn grouped_columns_checked<I, S>(&self, columns: I) -> Result<Arc<str>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns: Vec<S> = columns.into_iter().collect();
        if columns.is_empty() {
            return Err(Error::new(
                ErrorKind::MissingColumn,
                format!("No columns given for a grouped reference to table {}", self.name()),
            ));
        }
        for column in &columns {
            self.check_column(column.as_ref())?;
        }
        Ok(self.grouped_columns(columns))
    }

    pub fn qualified_column_checked(&self, column: &str) -> Result<Arc<str>> {
        self.check_column(column)?;
        Ok(self.qualified_column(column))
    }

    pub fn bare_column_checked(&self, column: &str) -> Result<Arc<str>> {
        self.check_column(column)?;
        Ok(self.bare_column(column))
    }

    /// Check that every given column is declared, handing the names back.
    pub fn col<'a>(&self, columns: &[&'a str]) -> Result<Vec<&'a str>> {
        for column in columns {
            self.check_column(column)?;
        }
        Ok(columns.to_vec())
    }

    fn check_column(&self, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::MissingColumn,
                format!("Column {} is not declared in table {}", column, self.name()),
            ))
        }
    }

    /// Cache lookup. On a miss the value is computed outside of any lock,
    /// and whichever thread publishes first wins.
    fn reference<F>(&self, key: ReferenceKey, compute: F) -> Arc<str>
    where
        F: FnOnce() -> String,
    {
        {
            let cache = self.references.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(found) = cache.get(&key) {
                return Arc::clone(found);
            }
        }
        let computed: Arc<str> = Arc::from(compute());
        let mut cache = self.references.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(key).or_insert(computed))
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl AsRef<str> for Table {
    fn as_ref(&self) -> &str {
        self.name()
    }
}

fn join_columns<I, S>(columns: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut joined = String::new();
    for (i, column) in columns.into_iter().enumerate() {
        if i > 0 {
            joined.push(',');
        }
        joined.push_str(column.as_ref());
    }
    joined
}
