use crate::error::Error;
use crate::error::ErrorKind;
use crate::error::Result;
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use std::collections::HashSet;
use std::fmt;

/// One schema entry: a column name and its raw type/constraint clause,
/// e.g. `text not null`. The clause is passed into DDL verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub name: String,
    pub type_clause: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyConstraint {
    pub keys: Vec<String>,
    /// Opaque reference text, normally another table's grouped-column reference
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Structural definition of a table.
///
/// In JSON, the schema is an object whose key order is the column order:
///
/// ```json
/// {"name": "users", "schema": {"name": "text not null"}, "primaryKeys": ["name"]}
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TableOptions {
    pub name: String,
    #[serde(
        serialize_with = "serialize_schema",
        deserialize_with = "deserialize_schema"
    )]
    pub schema: Vec<ColumnDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_keys: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKeyConstraint>,
    #[serde(default, rename = "withoutRowID")]
    pub without_rowid: bool,
}

impl TableOptions {
    pub fn new(name: impl Into<String>) -> TableOptions {
        TableOptions {
            name: name.into(),
            schema: Vec::new(),
            primary_keys: None,
            foreign_keys: Vec::new(),
            without_rowid: false,
        }
    }

    pub fn column(mut self, name: impl Into<String>, type_clause: impl Into<String>) -> Self {
        self.schema.push(ColumnDefinition {
            name: name.into(),
            type_clause: type_clause.into(),
        });
        self
    }

    pub fn primary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn foreign_key<I, S>(mut self, keys: I, reference: impl AsRef<str>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.foreign_keys.push(ForeignKeyConstraint {
            keys: keys.into_iter().map(Into::into).collect(),
            reference: reference.as_ref().to_string(),
        });
        self
    }

    pub fn without_rowid(mut self, without_rowid: bool) -> Self {
        self.without_rowid = without_rowid;
        self
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.schema.iter().any(|c| c.name == column)
    }

    /// Strict checks that table construction never does on its own:
    /// identifiers are well-formed, columns are unique,
    /// and every key column is declared in the schema.
    pub fn validate(&self) -> Result<()> {
        validate_identifier(&self.name).map_err(|err| {
            Error::new(err.kind, format!("Table {} is invalid, {}", self.name, err.msg))
        })?;
        let mut seen = HashSet::new();
        for column in &self.schema {
            validate_identifier(&column.name).map_err(|err| {
                Error::new(
                    err.kind,
                    format!("Column {} of table {} is invalid, {}", column.name, self.name, err.msg),
                )
            })?;
            if !seen.insert(column.name.as_str()) {
                return Err(Error::new(
                    ErrorKind::DuplicateColumn,
                    format!("Column {} is declared twice in table {}", column.name, self.name),
                ));
            }
        }
        for key in self.primary_keys.iter().flatten() {
            self.check_key_column(key, "PRIMARY KEY")?;
        }
        for constraint in &self.foreign_keys {
            for key in &constraint.keys {
                self.check_key_column(key, "FOREIGN KEY")?;
            }
        }
        Ok(())
    }

    fn check_key_column(&self, key: &str, clause: &str) -> Result<()> {
        if self.has_column(key) {
            Ok(())
        } else {
            Err(Error::new(
                ErrorKind::MissingColumn,
                format!(
                    "{} column {} is not declared in the schema of table {}",
                    clause, key, self.name
                ),
            ))
        }
    }
}

pub fn validate_identifier(name: &str) -> Result<()> {
    lazy_static! {
        static ref REGEXP: Regex =
            Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*$").expect("Cannot create regex");
    }
    if REGEXP.is_match(name) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorKind::InvalidIdentifier,
            format!(
                "Identifier {:?} does not satisfy the format {}",
                name,
                REGEXP.as_str()
            ),
        ))
    }
}

fn serialize_schema<S>(schema: &[ColumnDefinition], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(schema.len()))?;
    for column in schema {
        map.serialize_entry(&column.name, &column.type_clause)?;
    }
    map.end()
}

fn deserialize_schema<'de, D>(deserializer: D) -> std::result::Result<Vec<ColumnDefinition>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SchemaVisitor;

    impl<'de> Visitor<'de> for SchemaVisitor {
        type Value = Vec<ColumnDefinition>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("an object mapping column names to type clauses")
        }

        fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut schema: Vec<ColumnDefinition> = Vec::new();
            while let Some((name, type_clause)) = access.next_entry::<String, String>()? {
                if schema.iter().any(|c| c.name == name) {
                    return Err(serde::de::Error::custom(format!(
                        "{}: column {} is declared twice",
                        ErrorKind::DuplicateColumn.as_str(),
                        name
                    )));
                }
                schema.push(ColumnDefinition { name, type_clause });
            }
            Ok(schema)
        }
    }

    deserializer.deserialize_map(SchemaVisitor)
}
