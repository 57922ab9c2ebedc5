//! Shopwise CLI - Schema, dataset checks, and reports.
//!
//! # Usage
//!
//! ```bash
//! # Print the table definitions
//! sw-cli schema
//!
//! # Validate a dataset file against every table rule
//! sw-cli check --data data/shop.yaml
//!
//! # Run a report over the built-in seed dataset
//! sw-cli report top-users --limit 3
//!
//! # Pin "today" for date-relative text
//! sw-cli report order-lines --today 2024-02-12
//! ```
//!
//! # Commands
//!
//! - `schema` - Print the DDL
//! - `check` - Load a dataset and log row counts
//! - `report` - Print a report as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

mod commands;

use commands::report::ReportName;

#[derive(Parser)]
#[command(name = "sw-cli")]
#[command(author, version, about = "Shopwise CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the schema DDL
    Schema,
    /// Load a dataset and report how many rows each table received
    Check {
        /// YAML dataset file (default: built-in seed)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Print a report as pretty JSON
    Report {
        /// Report to run
        #[arg(value_enum)]
        name: ReportName,

        /// YAML dataset file (default: built-in seed)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Row cap for top-N reports
        #[arg(short, long)]
        limit: Option<usize>,

        /// Date used as "today" (YYYY-MM-DD, default: current UTC date)
        #[arg(short, long)]
        today: Option<NaiveDate>,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Schema => commands::schema::print(),
        Commands::Check { data } => {
            commands::check::run(data.as_deref())?;
        }
        Commands::Report {
            name,
            data,
            limit,
            today,
        } => commands::report::run(name, data.as_deref(), limit, today)?,
    }
    Ok(())
}
