//! # Quantity Updater (pure half)
//!
//! Turns a signed stock delta into a [`MovementPlan`]: the new quantity,
//! the ledger entry to append and the outflow timestamp to set, or a typed
//! rejection when the delta would drive the stock negative.
//!
//! The function is pure (the clock is a parameter), so every rule is
//! testable without a store. Applying a plan atomically is the job of
//! [`LedgerStore::apply_movement`](crate::store::LedgerStore::apply_movement).
//!
//! ## Decision Table
//! ```text
//! delta == 0                 → Ok(None)            no-op, nothing logged
//! current + delta < 0        → Err(InsufficientStock)
//! delta > 0                  → In  movement, quantity = delta
//! delta < 0                  → Out movement, quantity = |delta|,
//!                              outflow_at = explicit date (midnight UTC)
//!                                           or `now`
//! ```

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::InventoryError;
use crate::types::MovementKind;

// =============================================================================
// Movement Plan
// =============================================================================

/// The effect of one accepted stock update: what to persist and what to
/// append to the ledger. Produced by [`plan_movement`].
#[derive(Debug, Clone, PartialEq)]
pub struct MovementPlan {
    /// Direction of the movement.
    pub kind: MovementKind,
    /// Absolute quantity moved. Always strictly positive.
    pub quantity: i64,
    /// The product quantity after the movement. Never negative.
    pub new_quantity: i64,
    /// Ledger timestamp for the movement entry.
    pub occurred_at: DateTime<Utc>,
    /// New last-outflow timestamp; set only for outbound movements.
    pub outflow_at: Option<DateTime<Utc>>,
}

impl MovementPlan {
    /// The signed delta this plan applies.
    #[inline]
    pub fn signed_delta(&self) -> i64 {
        self.kind.signed(self.quantity)
    }
}

// =============================================================================
// Planning
// =============================================================================

/// Plans a quantity update for a product currently holding
/// `current_quantity` units.
///
/// Returns `Ok(None)` for a zero delta (no-op, nothing is logged) and
/// `Err(InsufficientStock)` when the delta would drive the quantity below
/// zero. `explicit_out_date` is honored only for outbound deltas and is
/// recorded at midnight UTC.
pub fn plan_movement(
    current_quantity: i64,
    delta: i64,
    explicit_out_date: Option<NaiveDate>,
    now: DateTime<Utc>,
) -> Result<Option<MovementPlan>, InventoryError> {
    if delta == 0 {
        return Ok(None);
    }

    let new_quantity = current_quantity + delta;
    if new_quantity < 0 {
        return Err(InventoryError::InsufficientStock {
            available: current_quantity,
            requested: -delta,
        });
    }

    let plan = if delta < 0 {
        let outflow_at = match explicit_out_date {
            Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
            None => now,
        };
        MovementPlan {
            kind: MovementKind::Out,
            quantity: -delta,
            new_quantity,
            occurred_at: now,
            outflow_at: Some(outflow_at),
        }
    } else {
        MovementPlan {
            kind: MovementKind::In,
            quantity: delta,
            new_quantity,
            occurred_at: now,
            outflow_at: None,
        }
    };

    Ok(Some(plan))
}

// =============================================================================
// Unit Tests
// =============================================================================
