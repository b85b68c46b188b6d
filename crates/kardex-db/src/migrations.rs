//! # Database Migrations
//!
//! Embedded SQL migrations for Kardex.
//!
//! The `sqlx::migrate!()` macro embeds all SQL files from the workspace's
//! `migrations/sqlite/` directory into the binary at compile time; no
//! runtime file access is needed. Applied migrations are tracked in the
//! `_sqlx_migrations` table, so running them again is a no-op.
//!
//! ## Adding New Migrations
//!
//! 1. Create a new file in `migrations/sqlite/` with the next sequence
//!    number, named `NNN_description.sql`
//! 2. Never modify existing migrations - always add new ones

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

/// Embedded migrations from the `migrations/sqlite` directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending database migrations.
///
/// Idempotent and ordered: migrations run in filename order, each inside
/// its own transaction.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    info!("checking for pending migrations");

    MIGRATOR.run(pool).await?;

    info!("all migrations applied");
    Ok(())
}
