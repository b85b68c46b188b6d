//! # Error Types
//!
//! Domain-specific error types for kardex-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Error Types                           │
//! │                                                             │
//! │  kardex-core errors (this file)                             │
//! │  ├── ValidationError - input validation failures            │
//! │  ├── StoreError      - what LedgerStore adapters return     │
//! │  └── InventoryError  - domain errors shown to the user      │
//! │                                                             │
//! │  kardex-db errors (separate crate)                          │
//! │  └── DbError         - SQLite failures, mapped to StoreError│
//! │                                                             │
//! │  Flow: sqlx::Error → DbError → StoreError → InventoryError  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before any state is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed date or amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Store Error
// =============================================================================

/// Errors returned by [`LedgerStore`](crate::store::LedgerStore)
/// implementations.
///
/// Deliberately storage-agnostic: no sqlx types leak through the port.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Entity not found in the store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violated.
    #[error("{entity} '{value}' already exists")]
    AlreadyExists { entity: String, value: String },

    /// Any other storage failure.
    #[error("storage error: {0}")]
    Storage(String),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        StoreError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates an AlreadyExists error.
    pub fn already_exists(entity: impl Into<String>, value: impl Into<String>) -> Self {
        StoreError::AlreadyExists {
            entity: entity.into(),
            value: value.into(),
        }
    }
}

// =============================================================================
// Inventory Error
// =============================================================================

/// Domain errors for inventory operations. Each variant maps to a
/// user-facing message printed by the menu loop.
#[derive(Debug, Error)]
pub enum InventoryError {
    /// The referenced product does not exist.
    #[error("product not found: {0}")]
    ProductNotFound(i64),

    /// An outbound movement would drive the quantity negative.
    #[error("insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    /// A product with this name is already registered.
    #[error("product '{0}' is already registered")]
    DuplicateName(String),

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Store error (wraps StoreError).
    #[error("{0}")]
    Store(#[from] StoreError),
}

/// Convenience type alias for Results with InventoryError.
pub type InventoryResult<T> = Result<T, InventoryError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = InventoryError::InsufficientStock {
            available: 2,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock: available 2, requested 5"
        );

        let err = InventoryError::ProductNotFound(42);
        assert_eq!(err.to_string(), "product not found: 42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        };
        assert_eq!(err.to_string(), "name must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_inventory_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let err: InventoryError = validation_err.into();
        assert!(matches!(err, InventoryError::Validation(_)));
    }

    #[test]
    fn test_store_error_helpers() {
        let err = StoreError::not_found("product", 7);
        assert_eq!(err.to_string(), "product not found: 7");

        let err = StoreError::already_exists("product", "Widget");
        assert_eq!(err.to_string(), "product 'Widget' already exists");
    }
}
