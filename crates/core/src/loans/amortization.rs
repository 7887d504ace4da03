//! Fixed-payment amortization math.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::utils::round_currency;

const MONTHS_PER_YEAR: u32 = 12;

/// Totals for a prospective loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanPreview {
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
}

fn overflow() -> Error {
    Error::Calculation("Monthly payment overflowed".to_string())
}

/// Fixed monthly payment for `principal` at `annual_rate` percent over
/// `term_months`, rounded to cents.
pub fn monthly_payment(principal: Decimal, annual_rate: Decimal, term_months: u32) -> Result<Decimal> {
    if principal <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NotPositive {
            field: "principal",
            value: principal.to_string(),
        }));
    }
    if term_months == 0 {
        return Err(Error::Validation(ValidationError::NotPositive {
            field: "termMonths",
            value: term_months.to_string(),
        }));
    }
    if annual_rate < Decimal::ZERO {
        return Err(Error::invalid(format!(
            "Interest rate cannot be negative: {}",
            annual_rate
        )));
    }

    let months = Decimal::from(term_months);
    let monthly_rate = annual_rate / Decimal::ONE_HUNDRED / Decimal::from(MONTHS_PER_YEAR);
    if monthly_rate.is_zero() {
        return Ok(round_currency(principal / months));
    }

    let growth = (Decimal::ONE + monthly_rate)
        .checked_powu(u64::from(term_months))
        .ok_or_else(overflow)?;
    let numerator = principal
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(growth))
        .ok_or_else(overflow)?;
    let payment = numerator
        .checked_div(growth - Decimal::ONE)
        .ok_or_else(overflow)?;
    Ok(round_currency(payment))
}

/// Monthly payment plus lifetime totals.
pub fn loan_preview(principal: Decimal, annual_rate: Decimal, term_months: u32) -> Result<LoanPreview> {
    let payment = monthly_payment(principal, annual_rate, term_months)?;
    let total_payment = payment
        .checked_mul(Decimal::from(term_months))
        .map(round_currency)
        .ok_or_else(overflow)?;
    Ok(LoanPreview {
        monthly_payment: payment,
        total_payment,
        total_interest: round_currency(total_payment - principal),
    })
}

/// Converts a term in (possibly fractional) years to whole months.
pub fn term_months_from_years(years: Decimal) -> Result<u32> {
    let months = (years * Decimal::from(MONTHS_PER_YEAR)).round();
    if months <= Decimal::ZERO {
        return Err(Error::Validation(ValidationError::NotPositive {
            field: "termYears",
            value: years.to_string(),
        }));
    }
    months
        .to_u32()
        .ok_or_else(|| Error::invalid(format!("Term of {} years is too long", years)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_zero_rate_divides_evenly() {
        assert_eq!(monthly_payment(dec!(100000), dec!(0), 100).unwrap(), dec!(1000.00));
    }

    #[test]
    fn test_standard_amortization() {
        // 200k mortgage at 6% over 30 years.
        assert_eq!(monthly_payment(dec!(200000), dec!(6), 360).unwrap(), dec!(1199.10));
        assert_eq!(monthly_payment(dec!(5000), dec!(8.5), 36).unwrap(), dec!(157.84));
    }

    #[test]
    fn test_rejects_invalid_arguments() {
        assert!(matches!(
            monthly_payment(dec!(0), dec!(5), 12),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            monthly_payment(dec!(1000), dec!(5), 0),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            monthly_payment(dec!(1000), dec!(-1), 12),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_preview_totals() {
        let preview = loan_preview(dec!(200000), dec!(6), 360).unwrap();
        assert_eq!(preview.total_payment, dec!(431676.00));
        assert_eq!(preview.total_interest, dec!(231676.00));
    }

    #[test]
    fn test_term_from_years() {
        assert_eq!(term_months_from_years(dec!(5)).unwrap(), 60);
        assert_eq!(term_months_from_years(dec!(2.5)).unwrap(), 30);
        assert!(term_months_from_years(dec!(0)).is_err());
    }
}
