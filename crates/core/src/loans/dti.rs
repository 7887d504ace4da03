//! Debt-to-income evaluation.

use std::sync::Arc;

use chrono::NaiveDateTime;
use log::{debug, warn};
use rust_decimal::{Decimal, RoundingStrategy};

use super::amortization::monthly_payment;
use super::loan_terms::{policy, LoanTerms};
use super::loans_model::{EmploymentStatus, LoanApplication, LoanEvaluation, LoanType};
use crate::accounts::AccountRepositoryTrait;
use crate::errors::{Error, Result};
use crate::transactions::TransactionServiceTrait;
use crate::utils::{format_currency, now_naive, round_currency};

const MONTHS_PER_YEAR: u32 = 12;

/// Facts an evaluation needs about an applicant and their request.
#[derive(Debug, Clone, PartialEq)]
pub struct DtiInput {
    pub user_id: String,
    pub loan_type: LoanType,
    pub amount: Decimal,
    pub annual_income: Decimal,
    pub employment_status: EmploymentStatus,
    pub term_months: Option<u32>,
}

impl From<&LoanApplication> for DtiInput {
    fn from(application: &LoanApplication) -> Self {
        Self {
            user_id: application.user_id.clone(),
            loan_type: application.loan_type,
            amount: application.amount,
            annual_income: application.income,
            employment_status: application.employment_status.clone(),
            term_months: application.term_months,
        }
    }
}

/// Applies the approval policy given the applicant's current monthly debt.
pub fn assess(input: &DtiInput, existing_monthly_debt: Decimal) -> Result<LoanEvaluation> {
    let terms = LoanTerms::for_type(input.loan_type);
    let term_months = terms.resolve_term(input.term_months);
    let payment = monthly_payment(input.amount, terms.interest_rate, term_months)?;
    let monthly_income = input.annual_income / Decimal::from(MONTHS_PER_YEAR);
    let total_monthly_debt = existing_monthly_debt + payment;

    let dti_ratio = if monthly_income <= Decimal::ZERO {
        policy::FAILED_DTI_RATIO
    } else {
        total_monthly_debt
            .checked_div(monthly_income)
            .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or_else(|| Error::Calculation("DTI ratio overflowed".to_string()))?
    };

    let dti_ok = dti_ratio <= policy::MAX_DTI_RATIO;
    let income_ok = monthly_income >= policy::MIN_MONTHLY_INCOME;
    let employment_ok = input.employment_status.is_eligible();
    let amount_ok =
        input.amount >= policy::MIN_LOAN_AMOUNT && input.amount <= policy::MAX_LOAN_AMOUNT;
    let approved = dti_ok && income_ok && employment_ok && amount_ok;

    let shown_ratio = dti_ratio.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    let reason = if approved {
        format!("Loan approved. DTI: {:.1}%, sustainable income.", shown_ratio)
    } else {
        let mut failures = Vec::new();
        if !dti_ok {
            failures.push(format!(
                "DTI too high ({:.1}% > {}%)",
                shown_ratio,
                policy::MAX_DTI_RATIO
            ));
        }
        if !income_ok {
            failures.push(format!(
                "insufficient income ({} < {})",
                format_currency(monthly_income),
                format_currency(policy::MIN_MONTHLY_INCOME)
            ));
        }
        if !employment_ok {
            failures.push(format!(
                "invalid employment status '{}'",
                input.employment_status
            ));
        }
        if !amount_ok {
            failures.push(format!(
                "amount outside limits ({} - {})",
                format_currency(policy::MIN_LOAN_AMOUNT),
                format_currency(policy::MAX_LOAN_AMOUNT)
            ));
        }
        format!("Loan rejected: {}", failures.join(", "))
    };

    Ok(LoanEvaluation {
        approved,
        dti_ratio: round_currency(dti_ratio),
        monthly_payment: payment,
        monthly_income: round_currency(monthly_income),
        total_monthly_debt: round_currency(total_monthly_debt),
        interest_rate: terms.interest_rate,
        term_months,
        reason,
    })
}

/// Rejected evaluation describing an internal failure.
fn failed_evaluation(input: &DtiInput, error: &Error) -> LoanEvaluation {
    let terms = LoanTerms::for_type(input.loan_type);
    LoanEvaluation {
        approved: false,
        dti_ratio: policy::FAILED_DTI_RATIO,
        monthly_payment: Decimal::ZERO,
        monthly_income: Decimal::ZERO,
        total_monthly_debt: Decimal::ZERO,
        interest_rate: terms.interest_rate,
        term_months: terms.resolve_term(input.term_months),
        reason: format!("Evaluation error: {}", error),
    }
}

/// Evaluates applications against the applicant's ledger history.
pub struct DtiEvaluator {
    account_repository: Arc<dyn AccountRepositoryTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
}

impl DtiEvaluator {
    pub fn new(
        account_repository: Arc<dyn AccountRepositoryTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
    ) -> Self {
        Self {
            account_repository,
            transaction_service,
        }
    }

    /// Sum of this month's expenses across every account of the user.
    pub fn existing_monthly_debt(&self, user_id: &str, at: NaiveDateTime) -> Result<Decimal> {
        let account_ids: Vec<String> = self
            .account_repository
            .find_by_user_id(user_id)?
            .into_iter()
            .map(|a| a.id)
            .collect();
        self.transaction_service
            .get_monthly_expenses(&account_ids, at)
    }

    /// Evaluates an application. Never fails: internal errors produce a
    /// rejection with a 100% ratio.
    pub fn evaluate(&self, input: &DtiInput) -> LoanEvaluation {
        let result = self
            .existing_monthly_debt(&input.user_id, now_naive())
            .and_then(|debt| assess(input, debt));
        match result {
            Ok(evaluation) => {
                debug!(
                    "DTI for user {}: {} (approved: {})",
                    input.user_id, evaluation.dti_ratio, evaluation.approved
                );
                evaluation
            }
            Err(e) => {
                warn!("DTI evaluation failed for user {}: {}", input.user_id, e);
                failed_evaluation(input, &e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(amount: Decimal, annual_income: Decimal, status: &str) -> DtiInput {
        DtiInput {
            user_id: "u1".to_string(),
            loan_type: LoanType::Personal,
            amount,
            annual_income,
            employment_status: EmploymentStatus::from(status),
            term_months: None,
        }
    }

    #[test]
    fn test_personal_loan_without_debt() {
        let evaluation = assess(&input(dec!(5000), dec!(36000), "employed"), dec!(0)).unwrap();
        assert!(evaluation.approved);
        assert_eq!(evaluation.interest_rate, dec!(8.5));
        assert_eq!(evaluation.term_months, 36);
        assert_eq!(evaluation.monthly_payment, dec!(157.84));
        assert_eq!(evaluation.monthly_income, dec!(3000));
        assert_eq!(evaluation.dti_ratio, dec!(5.26));
        assert!(evaluation.reason.contains("5.3%"));
    }

    #[test]
    fn test_dti_boundary_is_inclusive() {
        let request = input(dec!(1000), dec!(24000), "employed");
        let payment = monthly_payment(dec!(1000), dec!(8.5), 36).unwrap();

        let at_limit = assess(&request, dec!(800) - payment).unwrap();
        assert_eq!(at_limit.dti_ratio, dec!(40.00));
        assert!(at_limit.approved);

        let over = assess(&request, dec!(800.20) - payment).unwrap();
        assert_eq!(over.dti_ratio, dec!(40.01));
        assert!(!over.approved);
        assert!(over.reason.contains("DTI too high"));
    }

    #[test]
    fn test_lists_every_failing_criterion() {
        let evaluation = assess(&input(dec!(500), dec!(12000), "student"), dec!(0)).unwrap();
        assert!(!evaluation.approved);
        assert!(evaluation.reason.starts_with("Loan rejected: "));
        assert!(evaluation.reason.contains("insufficient income"));
        assert!(evaluation.reason.contains("'student'"));
        assert!(evaluation.reason.contains("amount outside limits"));
        assert!(!evaluation.reason.contains("DTI too high"));
    }

    #[test]
    fn test_unknown_employment_status_is_kept_and_rejected() {
        let evaluation =
            assess(&input(dec!(5000), dec!(90000), "freelancer"), dec!(0)).unwrap();
        assert!(!evaluation.approved);
        assert!(evaluation.reason.contains("'freelancer'"));
    }

    #[test]
    fn test_term_override_and_zero_income() {
        let mut request = input(dec!(5000), dec!(0), "employed");
        request.term_months = Some(12);
        let evaluation = assess(&request, dec!(0)).unwrap();
        assert_eq!(evaluation.term_months, 12);
        assert_eq!(evaluation.dti_ratio, dec!(100));
        assert!(!evaluation.approved);
    }

    #[test]
    fn test_failed_evaluation_shape() {
        let request = input(dec!(5000), dec!(36000), "employed");
        let evaluation = failed_evaluation(&request, &Error::Unexpected("boom".to_string()));
        assert!(!evaluation.approved);
        assert_eq!(evaluation.dti_ratio, dec!(100));
        assert!(evaluation.reason.contains("boom"));
    }
}
