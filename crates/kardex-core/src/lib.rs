//! # kardex-core: Pure Domain Logic for Kardex
//!
//! This crate is the heart of the Kardex inventory tracker. It contains the
//! domain types, the stock bookkeeping rules and the store port, all as pure
//! code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                   Kardex Architecture                   │
//! │                                                         │
//! │  ┌───────────────────────────────────────────────────┐  │
//! │  │                 apps/cli (menu)                   │  │
//! │  └───────────────────────┬───────────────────────────┘  │
//! │                          │                              │
//! │  ┌───────────────────────▼───────────────────────────┐  │
//! │  │           ★ kardex-core (THIS CRATE) ★            │  │
//! │  │                                                   │  │
//! │  │  ┌───────┐ ┌───────┐ ┌────────┐ ┌────────────┐   │  │
//! │  │  │ types │ │ money │ │ ledger │ │ inventory  │   │  │
//! │  │  └───────┘ └───────┘ └────────┘ └────────────┘   │  │
//! │  │  ┌────────────┐ ┌────────┐ ┌───────────────┐     │  │
//! │  │  │ validation │ │ report │ │ store (port)  │     │  │
//! │  │  └────────────┘ └────────┘ └───────────────┘     │  │
//! │  │                                                   │  │
//! │  │  NO I/O • NO DATABASE • NO TERMINAL               │  │
//! │  └───────────────────────┬───────────────────────────┘  │
//! │                          │ LedgerStore trait            │
//! │  ┌───────────────────────▼───────────────────────────┐  │
//! │  │            kardex-db (SQLite adapter)             │  │
//! │  └───────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, MovementEntry, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain and port error types
//! - [`validation`] - Input validation rules
//! - [`ledger`] - The quantity updater (pure half)
//! - [`store`] - The `LedgerStore` port implemented by storage adapters
//! - [`inventory`] - The `Inventory` service driving the store
//! - [`report`] - Reporting arithmetic (stock age, category totals, timeline)

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod ledger;
pub mod money;
pub mod report;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{InventoryError, InventoryResult, StoreError, ValidationError};
pub use inventory::{Inventory, StockChange};
pub use ledger::{plan_movement, MovementPlan};
pub use money::Money;
pub use store::LedgerStore;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of a category label.
pub const MAX_CATEGORY_LEN: usize = 100;

/// Quantity below which a product is reported as low on stock.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

/// Category label used in reports for products without a category.
pub const UNCATEGORIZED: &str = "Uncategorized";
