use rust_decimal::{Decimal, RoundingStrategy};

use crate::core::{AppError, Result};

/// Decimal places kept for stored amounts
pub const MONEY_SCALE: u32 = 2;

/// Round a stored amount to cents
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to a whole number, halves away from zero
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to one decimal place, halves away from zero
pub fn round_one_decimal(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Percentage change from `previous` to `current`, one decimal place.
///
/// A zero base yields 0 rather than an undefined ratio.
pub fn percent_change(current: Decimal, previous: Decimal) -> Decimal {
    if previous.is_zero() {
        return Decimal::ZERO;
    }
    round_one_decimal((current - previous) / previous * Decimal::ONE_HUNDRED)
}

/// Reject negative amounts
pub fn validate_non_negative(amount: Decimal, field: &str) -> Result<()> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(AppError::validation(format!(
            "{} cannot be negative, got {}",
            field, amount
        )));
    }
    Ok(())
}

/// Amount as printed on receipts, always two decimals
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}
