use crate::constants::WITHOUT_ROWID_SUFFIX;
use crate::table_options::TableOptions;

/// Generate the `CREATE TABLE IF NOT EXISTS` statement for a table.
///
/// Clauses are joined with a bare `,` in this order: columns as declared,
/// the primary key (only when non-empty), then foreign keys as declared.
/// Key columns are not checked against the schema here.
pub fn create_table_statement(options: &TableOptions) -> String {
    let mut clauses: Vec<String> = options
        .schema
        .iter()
        .map(|column| format!("{} {}", column.name, column.type_clause))
        .collect();

    if let Some(keys) = options.primary_keys.as_ref().filter(|keys| !keys.is_empty()) {
        clauses.push(format!("PRIMARY KEY({})", keys.join(",")));
    }

    for constraint in &options.foreign_keys {
        clauses.push(format!(
            "FOREIGN KEY({}) REFERENCES {}",
            constraint.keys.join(","),
            constraint.reference
        ));
    }

    let mut sql = format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        options.name,
        clauses.join(",")
    );
    if options.without_rowid {
        sql.push_str(WITHOUT_ROWID_SUFFIX);
    }
    sql
}
