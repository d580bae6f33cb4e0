//! # Error Types
//!
//! Domain-specific error types for comptoir-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  comptoir-core errors (this file)                                      │
//! │  ├── CoreError        - Cart / client / validation outcomes            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  comptoir-catalog errors (separate crate)                              │
//! │  └── CatalogError     - Lookup failures (degrade to manual search)     │
//! │                                                                         │
//! │  counter app errors                                                    │
//! │  └── ApiError         - What the screen shows (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → notification           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable. None of them leaves the cart or the client
//! context half-modified.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Counter-sale business errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The product is already a line of the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Scan "Laptop Dell XPS 13" (already in cart)
    ///      │
    ///      ▼
    /// DuplicateProduct { designation: "Laptop Dell XPS 13" }
    ///      │
    ///      ▼
    /// Cart unchanged, screen shows a transient warning
    /// ```
    #[error("Product already in cart: {designation}")]
    DuplicateProduct { designation: String },

    /// Validation attempted on a cart without lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation attempted without any client selected.
    ///
    /// Selecting the "Divers" client satisfies this precondition.
    #[error("No client selected")]
    NoClient,

    /// A row operation needs a selected row and there is none.
    #[error("No row selected")]
    NoSelection,

    /// Removal targeted a row other than the selected one.
    #[error("Row {index} is not the selected row")]
    NotSelected { index: usize },

    /// Row index past the end of the cart.
    #[error("Row {index} out of range (cart has {len} lines)")]
    RowOutOfRange { index: usize, len: usize },

    /// Cart has reached the maximum number of lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Client id unknown to the client directory.
    #[error("Client not found: {0}")]
    ClientNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two clients sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
