//! # Validation Module
//!
//! Input validation for quantities, pricing fields, and bill header
//! fields. All validators run before any ledger mutation, so a failed
//! check leaves the bill exactly as it was.

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::QuantityRule;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be strictly positive
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
/// - Must be a whole number under [`QuantityRule::WholeUnits`]
pub fn validate_quantity(qty: Decimal, rule: QuantityRule) -> ValidationResult<()> {
    if qty <= Decimal::ZERO {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > Decimal::from(MAX_ITEM_QUANTITY) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: Decimal::ONE,
            max: Decimal::from(MAX_ITEM_QUANTITY),
        });
    }

    if rule == QuantityRule::WholeUnits && !qty.fract().is_zero() {
        return Err(ValidationError::NotWholeNumber {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a GST percentage (0–100).
pub fn validate_gst_percent(pct: Decimal) -> ValidationResult<()> {
    if pct < Decimal::ZERO || pct > Decimal::ONE_HUNDRED {
        return Err(ValidationError::OutOfRange {
            field: "gst_percentage".to_string(),
            min: Decimal::ZERO,
            max: Decimal::ONE_HUNDRED,
        });
    }

    Ok(())
}

/// Validates a unit rate. Zero is allowed (free samples).
pub fn validate_rate(rate: Money) -> ValidationResult<()> {
    if rate.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: Decimal::ZERO,
            max: Decimal::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Header Field Validators
// =============================================================================

/// Validates a customer name.
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_required_text("customerName", name, 100)
}

/// Validates a village/locality name.
pub fn validate_village(village: &str) -> ValidationResult<()> {
    validate_required_text("village", village, 100)
}

/// Validates a mobile number: digits with optional `+`, `-`, spaces.
pub fn validate_mobile(mobile: &str) -> ValidationResult<()> {
    let mobile = mobile.trim();

    if mobile.is_empty() {
        return Err(ValidationError::Required {
            field: "mobileNum".to_string(),
        });
    }

    if mobile.len() > 15 {
        return Err(ValidationError::TooLong {
            field: "mobileNum".to_string(),
            max: 15,
        });
    }

    if !mobile
        .chars()
        .all(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == ' ')
    {
        return Err(ValidationError::InvalidFormat {
            field: "mobileNum".to_string(),
            reason: "must contain only digits, '+', '-', and spaces".to_string(),
        });
    }

    Ok(())
}

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
