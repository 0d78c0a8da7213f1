//! Conversion between wire amounts (JSON numbers) and stored amounts
//!
//! Amounts are stored as fixed-point decimals with two fractional digits and
//! exposed to callers as `f64`.

use crate::core::error::ValidationError;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Number of fractional digits kept for every stored amount
pub const AMOUNT_SCALE: u32 = 2;

/// Largest value a `NUMERIC(12, 2)` column holds
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Convert a wire amount into its stored form, rounded half away from zero.
pub fn to_stored(field: &str, amount: f64) -> Result<Decimal, ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::FieldError {
            field: field.to_string(),
            message: format!("amount must be a finite number (got {})", amount),
        });
    }

    let decimal = Decimal::try_from(amount).map_err(|e| ValidationError::FieldError {
        field: field.to_string(),
        message: format!("amount {} is out of range: {}", amount, e),
    })?;

    Ok(decimal.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero))
}

/// Like [`to_stored`], for columns that must hold at least one cent.
pub fn to_stored_positive(field: &str, amount: f64) -> Result<Decimal, ValidationError> {
    let stored = to_stored(field, amount)?;
    if stored <= Decimal::ZERO {
        return Err(ValidationError::FieldError {
            field: field.to_string(),
            message: format!("amount {} rounds to less than one cent", amount),
        });
    }
    if stored > MAX_AMOUNT {
        return Err(ValidationError::FieldError {
            field: field.to_string(),
            message: format!("amount {} exceeds the maximum of {}", amount, MAX_AMOUNT),
        });
    }
    Ok(stored)
}

/// Convert a stored amount into its wire form.
pub fn to_wire(amount: Decimal) -> f64 {
    match amount.to_f64() {
        Some(value) => value,
        None => {
            tracing::warn!(%amount, "amount has no f64 form, sending 0");
            0.0
        }
    }
}
