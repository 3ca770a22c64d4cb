//! # Error Types
//!
//! Domain-specific error types for balcao-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  balcao-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  balcao-db errors (separate crate)                                  │
//! │  ├── DbError          - Database operation failures                 │
//! │  └── CheckoutError    - Sale finalization failures                  │
//! │                                                                     │
//! │  balcao-pos errors (app layer)                                      │
//! │  └── PosError         - What the operator sees                      │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → DbError → PosError → screen    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, quantities)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Sale finalization was attempted on an empty cart.
    ///
    /// ## When This Occurs
    /// - Operator presses "Finalizar Venda" before adding any item
    /// - A receipt preview is requested for an empty cart
    #[error("the cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Caught at the boundary nearest the input, before any state changes.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Requested quantity exceeds the stock available when the line was
    /// added to the cart.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to cart (qty: 5)
    ///      │
    ///      ▼
    /// available stock: 3
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Café 500g", available: 3, requested: 5 }
    /// ```
    #[error("insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// Invalid format (e.g. unparsable price, unknown payment method).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
