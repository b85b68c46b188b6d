//! # kardex-db: Database Layer for Kardex
//!
//! SQLite persistence for the Kardex inventory tracker, built on sqlx.
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types and sqlx error classification
//! - [`store`] - `SqliteLedgerStore`, the [`kardex_core::LedgerStore`]
//!   adapter
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kardex_db::{Database, DbConfig};
//!
//! # async fn example() -> Result<(), kardex_db::DbError> {
//! // Create database with default config (runs migrations)
//! let db = Database::new(DbConfig::new("./kardex.db")).await?;
//!
//! // Hand the store to kardex-core's Inventory service
//! let store = db.ledger();
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::SqliteLedgerStore;
