//! Rates, default terms, amount limits and the approval policy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::loans_model::LoanType;

/// Pricing and limits for one loan type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    /// Annual interest rate in percent.
    pub interest_rate: Decimal,
    pub default_term_months: u32,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
}

impl LoanTerms {
    /// Terms used when a loan type is not recognised.
    pub const DEFAULT: LoanTerms = LoanTerms {
        interest_rate: dec!(8.5),
        default_term_months: 36,
        min_amount: dec!(1000),
        max_amount: dec!(50000),
    };

    pub fn for_type(loan_type: LoanType) -> LoanTerms {
        match loan_type {
            LoanType::Personal => Self::DEFAULT,
            LoanType::Auto => LoanTerms {
                interest_rate: dec!(6.2),
                default_term_months: 60,
                min_amount: dec!(5000),
                max_amount: dec!(80000),
            },
            LoanType::Mortgage => LoanTerms {
                interest_rate: dec!(4.8),
                default_term_months: 360,
                min_amount: dec!(50000),
                max_amount: dec!(1000000),
            },
            LoanType::Business => LoanTerms {
                interest_rate: dec!(9.5),
                default_term_months: 60,
                ..Self::DEFAULT
            },
        }
    }

    /// Looks terms up by type name, falling back to [`LoanTerms::DEFAULT`].
    pub fn lookup(loan_type: &str) -> LoanTerms {
        loan_type
            .parse::<LoanType>()
            .map(Self::for_type)
            .unwrap_or(Self::DEFAULT)
    }

    /// The override when present, otherwise the type's default term.
    pub fn resolve_term(&self, term_override: Option<u32>) -> u32 {
        term_override.unwrap_or(self.default_term_months)
    }
}

/// Debt-to-income approval policy.
pub mod policy {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Highest accepted debt-to-income ratio, in percent.
    pub const MAX_DTI_RATIO: Decimal = dec!(40);
    pub const MIN_MONTHLY_INCOME: Decimal = dec!(2000);
    pub const MIN_LOAN_AMOUNT: Decimal = dec!(1000);
    pub const MAX_LOAN_AMOUNT: Decimal = dec!(1000000);
    /// Ratio reported when income is zero or evaluation fails.
    pub const FAILED_DTI_RATIO: Decimal = dec!(100);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_and_terms_by_type() {
        let auto = LoanTerms::for_type(LoanType::Auto);
        assert_eq!(auto.interest_rate, dec!(6.2));
        assert_eq!(auto.default_term_months, 60);

        let mortgage = LoanTerms::for_type(LoanType::Mortgage);
        assert_eq!(mortgage.interest_rate, dec!(4.8));
        assert_eq!(mortgage.resolve_term(None), 360);
        assert_eq!(mortgage.resolve_term(Some(240)), 240);

        let business = LoanTerms::for_type(LoanType::Business);
        assert_eq!(business.interest_rate, dec!(9.5));
        assert_eq!(business.max_amount, dec!(50000));
    }

    #[test]
    fn test_lookup_falls_back_to_default() {
        assert_eq!(LoanTerms::lookup("boat"), LoanTerms::DEFAULT);
        assert_eq!(LoanTerms::lookup("AUTO").min_amount, dec!(5000));
    }
}
