use crate::query::Value;
use std::error::Error;
use std::path::PathBuf;
use structopt::clap::AppSettings;
use structopt::StructOpt;

#[derive(StructOpt, Debug, Clone)]
#[structopt(
    name = "tablesql",
    about = "Generate CREATE TABLE statements and list the parameters of SQL queries.",
    setting = AppSettings::DeriveDisplayOrder,
    setting = AppSettings::UnifiedHelpMessage,
)]
pub struct CliOptions {
    #[structopt(subcommand)]
    pub command: Command,
}

#[derive(StructOpt, Debug, Clone)]
pub enum Command {
    /// Print the CREATE TABLE statement of every table defined in a JSON file.
    ///
    /// The file holds an array of table definitions, e.g.
    /// `[{"name": "users", "schema": {"name": "text not null"}, "primaryKeys": ["name"]}]`.
    /// Schema keys are emitted in the order they appear in the file.
    Ddl {
        /// JSON file with the table definitions, or `-` for standard input.
        #[structopt(name = "FILE", parse(from_os_str))]
        file: PathBuf,

        /// Reject malformed identifiers, duplicate columns
        /// and key columns that are not part of the schema.
        /// Also enabled by the TABLESQL_STRICT environment variable.
        #[structopt(long)]
        strict: bool,
    },

    /// Print the distinct `$name` parameters of a query, one per line.
    Params {
        /// The query text.
        #[structopt(name = "QUERY")]
        query: String,

        /// Check that the given arguments match the parameters exactly,
        /// for example: `--arg id=42 --arg name=alice`.
        #[structopt(
            long = "arg",
            parse(try_from_str = parse_key_val),
            number_of_values = 1,
        )]
        arguments: Vec<(String, Value)>,
    },
}

pub fn parse_key_val<T, U>(s: &str) -> Result<(T, U), Box<dyn Error>>
where
    T: std::str::FromStr,
    T::Err: Error + 'static,
    U: std::str::FromStr,
    U::Err: Error + 'static,
{
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].parse()?, s[pos + 1..].parse()?))
}
