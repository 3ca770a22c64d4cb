//! # POS Error Type
//!
//! Unified error type for POS commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Balcão POS                             │
//! │                                                                         │
//! │  Screen                      Command Layer                              │
//! │  ──────                      ─────────────                              │
//! │                                                                         │
//! │  finalize_sale()                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, PosError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Empty cart? ────── CheckoutError::EmptyCart ──┐                │  │
//! │  │         │                                      │                │  │
//! │  │         ▼                                      ▼                │  │
//! │  │  Database error? ── DbError::QueryFailed ──── PosError ────────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  Screen shows: "[EMPTY_CART] the cart is empty"                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors carry a machine-readable `code` and a human-readable `message`
//! so the screen can branch without parsing text.

use serde::Serialize;

use balcao_core::{CoreError, ValidationError};
use balcao_db::{CheckoutError, DbError};
use balcao_receipt::ExportError;

/// Error returned from POS commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PosError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Sale finalization attempted on an empty cart
    EmptyCart,

    /// Database operation failed
    DatabaseError,

    /// Login failed or admin privilege missing
    Unauthorized,

    /// Receipt export/print failed
    ExportError,

    /// Internal error
    Internal,
}

impl PosError {
    /// Creates a new POS error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        PosError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        PosError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id.to_string()),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        PosError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        PosError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        PosError::new(ErrorCode::Internal, message)
    }
}

/// Converts validation errors to POS errors.
impl From<ValidationError> for PosError {
    fn from(err: ValidationError) -> Self {
        PosError::validation(err.to_string())
    }
}

/// Converts core errors to POS errors.
impl From<CoreError> for PosError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => PosError::new(ErrorCode::EmptyCart, err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

/// Converts database errors to POS errors.
impl From<DbError> for PosError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => PosError::not_found(&entity, id),
            DbError::UniqueViolation { field, value } => PosError::validation(format!(
                "{} '{}' already exists",
                field, value
            )),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                PosError::validation("Record is referenced by sale history")
            }
            DbError::ConnectionFailed(_) => {
                PosError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(_) => {
                PosError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                PosError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::PoolExhausted => {
                PosError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::PasswordHash(e) => {
                tracing::error!("Password hashing failed: {}", e);
                PosError::internal("Password hashing failed")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                PosError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts checkout errors to POS errors.
impl From<CheckoutError> for PosError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => PosError::new(ErrorCode::EmptyCart, err.to_string()),
            CheckoutError::Db(e) => e.into(),
        }
    }
}

/// Converts receipt export errors to POS errors.
impl From<ExportError> for PosError {
    fn from(err: ExportError) -> Self {
        PosError::new(ErrorCode::ExportError, err.to_string())
    }
}

impl std::fmt::Display for PosError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for PosError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_maps_to_its_own_code() {
        let err: PosError = CheckoutError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::EmptyCart);
    }

    #[test]
    fn test_not_found_mapping() {
        let err: PosError = DbError::not_found("Product", 42).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert!(err.message.contains("Product"));
        assert!(err.message.contains("42"));
    }

    #[test]
    fn test_serialized_shape() {
        let err = PosError::validation("quantity must be positive");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "quantity must be positive");
    }
}
