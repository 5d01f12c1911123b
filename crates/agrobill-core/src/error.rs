//! # Error Types
//!
//! Domain-specific error types for agrobill-core.
//!
//! Every error in this crate is recoverable: the operator corrects the
//! input and retries. Nothing here panics, and the inclusive-GST division
//! cannot hit a zero denominator because [`crate::money::GstRate`] rejects
//! percentages outside 0–100 before any arithmetic runs.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, available stock)
//! 3. Errors are enum variants, never String

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Ledger Error
// =============================================================================

/// Business-rule violations raised by the bill ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Requested quantity exceeds the product's tracked stock.
    ///
    /// Surfaced to the operator with the available quantity so they can
    /// re-prompt; the bill is left untouched.
    #[error("insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: Decimal,
    },

    /// Bill has exceeded the maximum allowed number of line items.
    #[error("bill cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// Submission was attempted with required header fields empty or with
    /// no line items. Lists every offending field by its wire name.
    #[error("bill is incomplete: missing {}", .missing.join(", "))]
    IncompleteBill { missing: Vec<String> },

    /// Input validation failure (wraps [`ValidationError`]).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any business logic runs; a failed validation never
/// mutates the ledger.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: String,
        min: Decimal,
        max: Decimal,
    },

    /// A fractional value was given where whole units are required.
    #[error("{field} must be a whole number")]
    NotWholeNumber { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. letters in a mobile number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with LedgerError.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages() {
        let err = LedgerError::InsufficientStock {
            name: "Urea 45kg".to_string(),
            available: 3,
            requested: dec!(5),
        };
        assert_eq!(
            err.to_string(),
            "insufficient stock for Urea 45kg: available 3, requested 5"
        );

        let err = LedgerError::IncompleteBill {
            missing: vec!["customerName".to_string(), "billDate".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "bill is incomplete: missing customerName, billDate"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_ledger_error() {
        let validation_err = ValidationError::Required {
            field: "customerName".to_string(),
        };
        let ledger_err: LedgerError = validation_err.into();
        assert!(matches!(ledger_err, LedgerError::Validation(_)));
    }
}
