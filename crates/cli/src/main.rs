//! Parfum CLI - Database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (schema + session store)
//! parfum-cli migrate
//!
//! # Import a supplier price list into the catalog
//! parfum-cli import-pricelist path/to/pricelist.csv
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "parfum-cli")]
#[command(author, version, about = "Parfum shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations (schema + session store)
    Migrate,
    /// Import a supplier CSV price list into the catalog
    ImportPricelist {
        /// Path to the CSV file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::ImportPricelist { path } => commands::import::run(&path).await?,
    }
    Ok(())
}
