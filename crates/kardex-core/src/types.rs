//! # Domain Types
//!
//! Core domain types used throughout Kardex.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Domain Types                          │
//! │                                                             │
//! │  ┌──────────────────┐        ┌──────────────────────┐      │
//! │  │     Product      │        │    MovementEntry     │      │
//! │  │  ──────────────  │ 1    n │  ──────────────────  │      │
//! │  │  id (i64)        │◄───────│  product_id (FK)     │      │
//! │  │  name (unique)   │        │  occurred_at         │      │
//! │  │  price_cents     │        │  kind (In | Out)     │      │
//! │  │  quantity (>= 0) │        │  quantity (> 0)      │      │
//! │  └──────────────────┘        └──────────────────────┘      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Movement entries form an append-only ledger: they are inserted together
//! with the quantity change they describe, never updated, and only removed
//! by the cascade when their product is deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::{LOW_STOCK_THRESHOLD, UNCATEGORIZED};

// =============================================================================
// Product
// =============================================================================

/// A stock-keeping unit with a price and an on-hand quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier, assigned by the store.
    pub id: i64,

    /// Display name. Unique across all products.
    pub name: String,

    /// Optional free-text category, e.g. "Tools".
    pub category: Option<String>,

    /// Unit price in cents.
    pub price_cents: i64,

    /// Quantity on hand. Never negative.
    pub quantity: i64,

    /// When the product was registered. Set once at creation.
    pub registered_at: DateTime<Utc>,

    /// When stock last flowed out. Updated only on outbound movements.
    pub last_outflow_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns the unit price as a Money value.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the cost of the on-hand stock (`price * quantity`).
    #[inline]
    pub fn stock_cost(&self) -> Money {
        self.price() * self.quantity
    }

    /// Returns the stock status used by the management report.
    pub fn status(&self) -> StockStatus {
        if self.quantity < LOW_STOCK_THRESHOLD {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    /// Category label for grouping; products without a category share the
    /// [`UNCATEGORIZED`] bucket.
    pub fn category_label(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => UNCATEGORIZED,
        }
    }
}

/// Input for registering a new product. Validated by the `Inventory`
/// service before it reaches a store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub category: Option<String>,
    pub price: Money,
    /// Starting quantity. When positive, registration also records the
    /// initial inbound movement.
    pub quantity: i64,
}

// =============================================================================
// Stock Status
// =============================================================================

/// Report status for a product's stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// Healthy stock level.
    Ok,
    /// Below the low-stock threshold.
    Low,
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockStatus::Ok => write!(f, "OK"),
            StockStatus::Low => write!(f, "LOW"),
        }
    }
}

// =============================================================================
// Movement Kind
// =============================================================================

/// Direction of a stock movement. The sign of a change is carried here,
/// never in the movement quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum MovementKind {
    /// Inbound: stock received.
    In,
    /// Outbound: stock shipped or consumed.
    Out,
}

impl MovementKind {
    /// Applies the direction to a positive quantity, yielding a signed delta.
    #[inline]
    pub fn signed(&self, quantity: i64) -> i64 {
        match self {
            MovementKind::In => quantity,
            MovementKind::Out => -quantity,
        }
    }

    /// Short uppercase label for display.
    pub fn label(&self) -> &'static str {
        match self {
            MovementKind::In => "IN",
            MovementKind::Out => "OUT",
        }
    }
}

// =============================================================================
// Movement Entry
// =============================================================================

/// One immutable record of an inbound or outbound quantity change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct MovementEntry {
    pub id: i64,
    pub product_id: i64,
    pub occurred_at: DateTime<Utc>,
    pub kind: MovementKind,
    /// Always strictly positive; direction lives in `kind`.
    pub quantity: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================
