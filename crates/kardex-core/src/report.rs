//! # Reporting Arithmetic
//!
//! Pure computations behind the management report and the charts: stock
//! age, per-category aggregates and the stock-over-time fold. The CLI
//! renders these; nothing here touches a store or a terminal.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::money::Money;
use crate::types::{MovementEntry, Product};

// =============================================================================
// Stock Age
// =============================================================================

/// Whole days a product has spent in stock: from registration until the
/// last outflow, or until `now` when nothing has flowed out yet.
pub fn days_in_stock(
    registered_at: DateTime<Utc>,
    last_outflow_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> i64 {
    let end = last_outflow_at.unwrap_or(now);
    (end - registered_at).num_days()
}

// =============================================================================
// Category Totals
// =============================================================================

/// Per-category aggregate of stock cost and quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total_cost: Money,
    pub total_quantity: i64,
}

/// Sums `price * quantity` and quantity per category. Products without a
/// category land in the [`UNCATEGORIZED`](crate::UNCATEGORIZED) bucket.
/// Returned in category order; callers sort as their display needs.
pub fn category_totals(products: &[Product]) -> Vec<CategoryTotal> {
    let mut by_category: BTreeMap<String, (Money, i64)> = BTreeMap::new();

    for product in products {
        let entry = by_category
            .entry(product.category_label().to_string())
            .or_insert((Money::zero(), 0));
        entry.0 += product.stock_cost();
        entry.1 += product.quantity;
    }

    by_category
        .into_iter()
        .map(|(category, (total_cost, total_quantity))| CategoryTotal {
            category,
            total_cost,
            total_quantity,
        })
        .collect()
}

// =============================================================================
// Report Summary
// =============================================================================

/// Footer totals of the management report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub product_count: usize,
    pub total_cost: Money,
}

/// Counts distinct products and sums the whole stock's cost.
pub fn report_summary(products: &[Product]) -> ReportSummary {
    let total_cost = products
        .iter()
        .fold(Money::zero(), |acc, p| acc + p.stock_cost());

    ReportSummary {
        product_count: products.len(),
        total_cost,
    }
}

// =============================================================================
// Stock Timeline
// =============================================================================

/// Replays the ledger chronologically and returns the total stock level
/// at the end of each day that saw at least one movement.
///
/// The input must already be ordered by occurrence time (the stores
/// return it that way).
pub fn stock_timeline(movements: &[MovementEntry]) -> Vec<(NaiveDate, i64)> {
    let mut level = 0i64;
    let mut by_day: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for movement in movements {
        level += movement.kind.signed(movement.quantity);
        by_day.insert(movement.occurred_at.date_naive(), level);
    }

    by_day.into_iter().collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
