extern crate tablesql;

use rusqlite::named_params;
use rusqlite::Connection;
use tablesql::Query;
use tablesql::Table;

mod common;

fn open(tables: &[&Table]) -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to open in-memory SQLite");
    conn.execute_batch("PRAGMA foreign_keys = ON;").unwrap();
    for table in tables {
        conn.execute_batch(table.init())
            .unwrap_or_else(|err| panic!("Failed to create {}, {}", table, err));
    }
    conn
}

#[test]
fn generated_ddl_is_accepted_by_sqlite() {
    let users = common::users();
    let posts = common::posts(&users);
    let conn = open(&[&users, &posts]);
    // Running the statements again is a no-op
    conn.execute_batch(users.init()).unwrap();
    conn.execute_batch(posts.init()).unwrap();
}

#[test]
fn extracted_parameters_match_sqlite_binding() {
    let users = common::users();
    let conn = open(&[&users]);
    let query = Query::new(format!(
        "select {} from {} where {} = $name and {} != $name and 'x' != '$pass'",
        users.bare_column("pass"),
        users,
        users.qualified_column("name"),
        users.qualified_column("pass"),
    ))
    .unwrap();

    let stmt = conn.prepare(query.text()).unwrap();
    assert_eq!(stmt.parameter_count(), query.parameters().len());
    for parameter in query.parameters() {
        let index = stmt.parameter_index(&format!("${}", parameter)).unwrap();
        assert!(index.is_some(), "SQLite does not know ${}", parameter);
    }
}

#[test]
fn foreign_key_is_enforced() {
    let users = common::users();
    let posts = common::posts(&users);
    let conn = open(&[&users, &posts]);

    let insert_user = Query::new(format!(
        "insert into {} ({}) values ($name, $pass)",
        users,
        users.columns().join(",")
    ))
    .unwrap();
    conn.execute(
        insert_user.text(),
        named_params! {"$name": "alice", "$pass": "secret"},
    )
    .unwrap();

    let insert_post = Query::new(format!(
        "insert into {} ({}) values ($id, $title, $content, $author)",
        posts,
        posts.columns().join(",")
    ))
    .unwrap();
    assert_eq!(insert_post.parameters().len(), posts.columns().len());
    let ok = conn.execute(
        insert_post.text(),
        named_params! {"$id": 1, "$title": "hi", "$content": "...", "$author": "alice"},
    );
    assert_eq!(ok.unwrap(), 1);

    let orphan = conn.execute(
        insert_post.text(),
        named_params! {"$id": 2, "$title": "hi", "$content": "...", "$author": "bob"},
    );
    assert!(orphan.is_err());
}
