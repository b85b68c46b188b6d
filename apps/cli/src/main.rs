//! Kardex CLI entry point - the composition root.
//!
//! This is the only place where infrastructure is wired together: the
//! SQLite pool is opened, migrations run, the store is handed to the
//! inventory service and the menu loop takes over.

mod charts;
mod menu;
mod tables;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use kardex_core::Inventory;
use kardex_db::{Database, DbConfig};

/// Single-user inventory tracker with an append-only movement ledger.
#[derive(Debug, Parser)]
#[command(name = "kardex", version, about)]
struct Cli {
    /// Path to the SQLite database file.
    #[arg(long, default_value = "kardex.db")]
    db: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Keep the menu output clean by default; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let db = Database::new(DbConfig::new(&cli.db)).await?;
    println!("Database ready at {}.", cli.db.display());

    let inventory = Inventory::new(Arc::new(db.ledger()));
    let result = menu::run(&inventory).await;

    db.close().await;
    result
}
