//! # Validation Module
//!
//! Input validation rules applied before any mutation.
//!
//! ```text
//! Menu input (strings)
//!      │
//!      ▼
//! THIS MODULE: trim, length and range checks
//!      │
//!      ▼
//! Database CHECK / UNIQUE constraints (last line)
//! ```
//!
//! ## Usage
//! ```rust
//! use kardex_core::validation::{validate_product_name, validate_movement_quantity};
//!
//! assert_eq!(validate_product_name("  Widget ").unwrap(), "Widget");
//! assert!(validate_movement_quantity(5).is_ok());
//! assert!(validate_movement_quantity(0).is_err());
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CATEGORY_LEN, MAX_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates an optional category label and returns it trimmed.
///
/// An empty or whitespace-only category becomes `None`.
pub fn validate_category(category: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(category) = category else {
        return Ok(None);
    };

    let category = category.trim();
    if category.is_empty() {
        return Ok(None);
    }

    if category.len() > MAX_CATEGORY_LEN {
        return Err(ValidationError::TooLong {
            field: "category".to_string(),
            max: MAX_CATEGORY_LEN,
        });
    }

    Ok(Some(category.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price. Zero is allowed (free items), negative is not.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a starting quantity at registration. Zero is allowed.
pub fn validate_initial_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a movement quantity. Must be strictly positive; the direction
/// is decided by the movement kind, not by the sign of this value.
pub fn validate_movement_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Parses an explicit outflow date in `YYYY-MM-DD` form.
pub fn parse_out_date(raw: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidFormat {
        field: "date".to_string(),
        reason: "use YYYY-MM-DD, e.g. 2025-11-14".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
