//! Currency normalization for `NUMERIC(10, 2)` columns.
//!
//! Postgres rounds on write and keeps the declared scale on read; SQLite
//! stores a float and hands back whatever scale survives the round trip.
//! Everything that goes in or comes out of a currency column passes through
//! here so both backends agree on two fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::RepositoryError;

/// Fractional digits kept for every currency value.
pub const CURRENCY_SCALE: u32 = 2;

/// Total digits allowed by `NUMERIC(10, 2)`.
pub const CURRENCY_PRECISION: u32 = 10;

/// Round to two places (half away from zero) and fix the scale at two.
///
/// Fails when the rounded value does not fit in `NUMERIC(10, 2)`.
pub fn normalize(field: &'static str, value: Decimal) -> Result<Decimal, RepositoryError> {
    let mut rounded =
        value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_SCALE);

    let limit = Decimal::from(10_i64.pow(CURRENCY_PRECISION - CURRENCY_SCALE));
    if rounded.abs() >= limit {
        return Err(RepositoryError::validation_error(format!(
            "{field} {value} exceeds NUMERIC({CURRENCY_PRECISION}, {CURRENCY_SCALE})"
        )));
    }

    Ok(rounded)
}

/// Fix the scale of a value read back from the database.
pub fn rescaled(value: Decimal) -> Decimal {
    let mut value =
        value.round_dp_with_strategy(CURRENCY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    value.rescale(CURRENCY_SCALE);
    value
}

/// Normalize and require a strictly positive amount.
pub fn positive(field: &'static str, value: Decimal) -> Result<Decimal, RepositoryError> {
    let value = normalize(field, value)?;
    if value <= Decimal::ZERO {
        return Err(RepositoryError::validation_error(format!(
            "{field} must be greater than zero"
        )));
    }
    Ok(value)
}

/// Normalize and require a non-negative amount.
pub fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal, RepositoryError> {
    let value = normalize(field, value)?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(RepositoryError::validation_error(format!(
            "{field} cannot be negative"
        )));
    }
    Ok(value)
}
