use tablesql::Table;
use tablesql::TableOptions;

pub fn users() -> Table {
    Table::new(
        TableOptions::new("users")
            .column("name", "text not null")
            .column("pass", "text not null")
            .primary_keys(vec!["name"]),
    )
}

pub fn posts(users: &Table) -> Table {
    Table::new(
        TableOptions::new("posts")
            .column("id", "int not null")
            .column("title", "text not null")
            .column("content", "text not null")
            .column("author", "text not null")
            .primary_keys(vec!["id"])
            .foreign_key(vec!["author"], users.grouped_columns(&["name"])),
    )
}
