//! # Validation Module
//!
//! Input validation for the counter-sale screen.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog / client loading                                     │
//! │  └── CatalogEntry::validate, Client::validate (reject bad records)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Screen input                                                 │
//! │  └── search query length, barcode shape                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart                                                         │
//! │  └── cart size, designation uniqueness                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use comptoir_core::validation::{validate_barcode, validate_search_query};
//!
//! assert!(validate_barcode("6111245780012").is_ok());
//! assert_eq!(validate_search_query("  dell ").unwrap(), "dell");
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_CART_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_BARCODE_LEN: usize = 64;
const MAX_DESIGNATION_LEN: usize = 200;
const MAX_QUERY_LEN: usize = 100;

/// Highest accepted unit price, in minor units (10 000 000 000.00).
///
/// A full cart of lines at this price still sums well inside `i64`.
pub const MAX_UNIT_PRICE: i64 = 1_000_000_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a barcode or typed product code.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 64 characters
/// - No interior whitespace
///
/// ```rust
/// use comptoir_core::validation::validate_barcode;
///
/// assert!(validate_barcode("LAP-XPS13").is_ok());
/// assert!(validate_barcode("").is_err());
/// assert!(validate_barcode("61 11").is_err());
/// ```
pub fn validate_barcode(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if code.chars().count() > MAX_BARCODE_LEN {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: MAX_BARCODE_LEN,
        });
    }

    if code.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates a product designation (1 to 200 characters).
pub fn validate_designation(designation: &str) -> ValidationResult<()> {
    let designation = designation.trim();

    if designation.is_empty() {
        return Err(ValidationError::Required {
            field: "designation".to_string(),
        });
    }

    if designation.chars().count() > MAX_DESIGNATION_LEN {
        return Err(ValidationError::TooLong {
            field: "designation".to_string(),
            max: MAX_DESIGNATION_LEN,
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
///
/// An empty query is valid: it means "the whole catalog".
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a unit price: zero (free items) up to [`MAX_UNIT_PRICE`].
///
/// ```rust
/// use comptoir_core::money::Money;
/// use comptoir_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_major(89_000)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_minor(-100)).is_err());
/// assert!(validate_price(Money::from_minor(i64::MAX / 2 + 1)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.minor() > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 0,
            max: MAX_UNIT_PRICE,
        });
    }

    Ok(())
}

/// Validates a discount in basis points (0% to 100%).
pub fn validate_discount_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "discount".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

/// Validates a flat tax rate in basis points (0% to 100%).
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10_000,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Checks that one more line fits in a cart holding `current_items` lines.
pub fn validate_cart_size(current_items: usize) -> ValidationResult<()> {
    if current_items >= MAX_CART_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "cart items".to_string(),
            min: 0,
            max: MAX_CART_ITEMS as i64,
        });
    }

    Ok(())
}
