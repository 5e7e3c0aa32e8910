use chrono::Utc;
use env_logger::Env;
use log::error;
use log::info;
use std::collections::HashMap;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use structopt::StructOpt;
use tablesql::command_line_interface::CliOptions;
use tablesql::command_line_interface::Command;
use tablesql::configuration;
use tablesql::error::ErrorContext;
use tablesql::error::Result;
use tablesql::Query;
use tablesql::Table;
use tablesql::TableOptions;
use tablesql::Value;

fn main() {
    env_logger::Builder::from_env(Env::default().filter_or("RUST_LOG", "info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    let cli = CliOptions::from_args();
    let result = match cli.command {
        Command::Ddl { file, strict } => {
            print_ddl(&file, strict || configuration::strict_from_env())
        }
        Command::Params { query, arguments } => print_params(query, arguments),
    };
    if let Err(err) = result {
        error!("{}", err);
        std::process::exit(1);
    }
}

fn print_ddl(file: &Path, strict: bool) -> Result<()> {
    let mut text = String::new();
    if file == Path::new("-") {
        std::io::stdin()
            .read_to_string(&mut text)
            .context_str("Failed to read table definitions from standard input")?;
    } else {
        text = std::fs::read_to_string(file)
            .context(|| format!("Failed to read table definitions from {}", file.display()))?;
    }
    let deserializer = &mut serde_json::Deserializer::from_str(&text);
    let definitions: Vec<TableOptions> = serde_path_to_error::deserialize(deserializer)
        .context(|| format!("Failed to parse table definitions in {}", file.display()))?;
    info!("Read {} table definitions", definitions.len());

    for options in definitions {
        let table = if strict {
            let name = options.name.clone();
            Table::new_checked(options).context(|| format!("Table {} rejected", name))?
        } else {
            Table::new(options)
        };
        println!("{}", table.init());
    }
    Ok(())
}

fn print_params(query: String, arguments: Vec<(String, Value)>) -> Result<()> {
    let query = Query::new(query)?;
    if !arguments.is_empty() {
        let arguments: HashMap<String, Value> = arguments.into_iter().collect();
        query.check_arguments(&arguments)?;
        info!("Arguments match all {} parameters", query.parameters().len());
    }
    for parameter in query.parameters() {
        println!("{}", parameter);
    }
    Ok(())
}
