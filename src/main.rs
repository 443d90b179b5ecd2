use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use swift_directory::{import_csv, Config, DirectoryService, SqliteStore};

/// Import and query the SWIFT code directory from a terminal
#[derive(Debug, Parser)]
#[command(name = "swift-directory", version)]
struct Cli {
    /// SQLite database (defaults to $SWIFT_DB_PATH, then swift_codes.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a SWIFT code sheet exported as CSV (skipped if data exists)
    Import { csv: PathBuf },
    /// Show a code, with its branches when it is a headquarters
    Show { swift_code: String },
    /// List every code registered for a country
    Country { iso2: String },
    /// Remove a single code
    Delete { swift_code: String },
}

fn main() -> Result<()> {
    swift_directory::init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }

    let store = SqliteStore::open(&config.database_path)
        .with_context(|| format!("Failed to open {}", config.database_path.display()))?;

    match cli.command {
        Command::Import { csv } => {
            let report = import_csv(&store, &csv)?;
            print_json(&report)?;
        }
        Command::Show { swift_code } => {
            let service = DirectoryService::new(store);
            print_json(&service.get_by_code(&swift_code)?)?;
        }
        Command::Country { iso2 } => {
            let service = DirectoryService::new(store);
            print_json(&service.get_by_country(&iso2)?)?;
        }
        Command::Delete { swift_code } => {
            let service = DirectoryService::new(store);
            service.delete(&swift_code)?;
            println!("Deleted {}", swift_code);
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
