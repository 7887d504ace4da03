//! Property-based tests for loan pricing and debt-to-income decisions.

use financehub_core::loans::{
    assess, loan_preview, monthly_payment, policy, DtiInput, EmploymentStatus, LoanType,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// =============================================================================
// Generators
// =============================================================================

/// Whole-euro principal between the policy limits.
fn arb_principal() -> impl Strategy<Value = Decimal> {
    (1_000i64..=1_000_000).prop_map(Decimal::from)
}

/// Annual rate in basis points, expressed as a percentage.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (1i64..=2_000).prop_map(|bps| Decimal::new(bps, 2))
}

fn arb_term() -> impl Strategy<Value = u32> {
    1u32..=480
}

fn arb_loan_type() -> impl Strategy<Value = LoanType> {
    prop_oneof![
        Just(LoanType::Personal),
        Just(LoanType::Auto),
        Just(LoanType::Mortgage),
        Just(LoanType::Business),
    ]
}

fn arb_employment() -> impl Strategy<Value = EmploymentStatus> {
    prop_oneof![
        Just(EmploymentStatus::from("employed")),
        Just(EmploymentStatus::from("self_employed")),
        Just(EmploymentStatus::from("unemployed")),
        Just(EmploymentStatus::from("retired")),
    ]
}

fn arb_application() -> impl Strategy<Value = DtiInput> {
    (
        arb_loan_type(),
        (500i64..=1_200_000).prop_map(Decimal::from),
        (0i64..=300_000).prop_map(Decimal::from),
        arb_employment(),
        proptest::option::of(1u32..=360),
    )
        .prop_map(|(loan_type, amount, income, employment_status, term)| DtiInput {
            user_id: "u1".to_string(),
            loan_type,
            amount,
            annual_income: income,
            employment_status,
            term_months: term,
        })
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// With interest, the instalments repay at least the principal
    /// (allowing half a cent of rounding per instalment).
    #[test]
    fn prop_payments_cover_principal(
        principal in arb_principal(),
        rate in arb_rate(),
        term in arb_term(),
    ) {
        let payment = monthly_payment(principal, rate, term).unwrap();
        let tolerance = dec!(0.005) * Decimal::from(term);
        prop_assert!(payment * Decimal::from(term) + tolerance >= principal);
    }

    /// Interest-free loans split the principal evenly.
    #[test]
    fn prop_zero_rate_splits_principal(
        principal in arb_principal(),
        term in arb_term(),
    ) {
        let payment = monthly_payment(principal, Decimal::ZERO, term).unwrap();
        let tolerance = dec!(0.005) * Decimal::from(term);
        let repaid = payment * Decimal::from(term);
        prop_assert!((repaid - principal).abs() <= tolerance);
    }

    /// A higher rate never lowers the instalment.
    #[test]
    fn prop_payment_monotonic_in_rate(
        principal in arb_principal(),
        low in arb_rate(),
        extra in 0i64..=500,
        term in arb_term(),
    ) {
        let high = low + Decimal::new(extra, 2);
        let low_payment = monthly_payment(principal, low, term).unwrap();
        let high_payment = monthly_payment(principal, high, term).unwrap();
        prop_assert!(high_payment >= low_payment);
    }

    /// Preview totals agree with the instalment.
    #[test]
    fn prop_preview_totals_consistent(
        principal in arb_principal(),
        rate in arb_rate(),
        term in arb_term(),
    ) {
        let preview = loan_preview(principal, rate, term).unwrap();
        prop_assert_eq!(preview.total_payment, preview.monthly_payment * Decimal::from(term));
        prop_assert_eq!(preview.total_interest, preview.total_payment - principal);
    }

    /// Approval implies every policy check passed.
    #[test]
    fn prop_approval_respects_policy(
        input in arb_application(),
        existing_debt in (0i64..=5_000).prop_map(Decimal::from),
    ) {
        let evaluation = assess(&input, existing_debt).unwrap();
        if evaluation.approved {
            prop_assert!(evaluation.dti_ratio <= policy::MAX_DTI_RATIO);
            prop_assert!(evaluation.monthly_income >= policy::MIN_MONTHLY_INCOME);
            prop_assert!(input.employment_status.is_eligible());
            prop_assert!(input.amount >= policy::MIN_LOAN_AMOUNT);
            prop_assert!(input.amount <= policy::MAX_LOAN_AMOUNT);
            prop_assert!(evaluation.reason.starts_with("Loan approved"));
        } else {
            prop_assert!(evaluation.reason.starts_with("Loan rejected"));
        }
    }

    /// Extra existing debt can only turn an approval into a rejection.
    #[test]
    fn prop_more_debt_never_helps(
        input in arb_application(),
        existing_debt in (0i64..=2_000).prop_map(Decimal::from),
        extra in (1i64..=2_000).prop_map(Decimal::from),
    ) {
        let base = assess(&input, existing_debt).unwrap();
        let burdened = assess(&input, existing_debt + extra).unwrap();
        prop_assert!(burdened.dti_ratio >= base.dti_ratio);
        if burdened.approved {
            prop_assert!(base.approved);
        }
    }
}
