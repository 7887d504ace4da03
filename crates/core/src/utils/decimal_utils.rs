use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{
    CURRENCY_DECIMAL_PRECISION, PRICE_DECIMAL_PRECISION, SHARES_DECIMAL_PRECISION,
};
use crate::errors::{Error, Result};

/// Turns the `None` of a `checked_*` operation into a calculation error.
pub fn or_overflow(value: Option<Decimal>, what: &str) -> Result<Decimal> {
    value.ok_or_else(|| Error::Calculation(format!("{} overflowed", what)))
}

/// Rounds a currency amount to cents, half away from zero.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        CURRENCY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Rounds a share quantity to four decimal places.
pub fn round_shares(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        SHARES_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Rounds a per-share cost basis.
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        PRICE_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}

/// Formats a currency amount with thousands separators, e.g. `€12,345.60`.
pub fn format_currency(value: Decimal) -> String {
    let rounded = round_currency(value.abs());
    let text = format!("{:.2}", rounded);
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}€{}.{}", sign, grouped, fraction)
}

/// Formats a percentage with an explicit sign and one decimal, e.g. `+4.2%`.
pub fn format_signed_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("{:.1}%", rounded)
    } else {
        format!("+{:.1}%", rounded.abs())
    }
}
