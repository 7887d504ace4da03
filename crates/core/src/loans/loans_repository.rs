use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::loans_model::{Loan, LoanApplication, LoanStatus};
use super::loans_traits::{LoanApplicationRepositoryTrait, LoanRepositoryTrait};
use crate::errors::{Error, Result};
use crate::ledger::{Ledger, LedgerStore};
use crate::utils::or_overflow;

/// In-memory loan repository.
pub struct LoanRepository {
    store: Arc<LedgerStore>,
}

impl LoanRepository {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }
}

impl LoanRepositoryTrait for LoanRepository {
    fn create_in_transaction(&self, ledger: &mut Ledger, loan: Loan) -> Result<Loan> {
        ledger.loans.insert(loan)
    }

    fn get_by_id(&self, loan_id: &str) -> Result<Loan> {
        self.store
            .read(|ledger| ledger.loans.require(loan_id).cloned())?
    }

    fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Loan>> {
        self.store
            .read(|ledger| ledger.loans.filter(|l| l.user_id == user_id))
    }

    fn find_by_status(&self, user_id: &str, status: LoanStatus) -> Result<Vec<Loan>> {
        self.store.read(|ledger| {
            ledger
                .loans
                .filter(|l| l.user_id == user_id && l.status == status)
        })
    }

    fn apply_payment(&self, loan_id: &str, amount: Decimal, at: NaiveDateTime) -> Result<Loan> {
        self.store.execute(|ledger| {
            let loan = ledger.loans.require_mut(loan_id)?;
            if loan.status != LoanStatus::Active {
                return Err(Error::ConstraintViolation(format!(
                    "Loan {} is not active",
                    loan_id
                )));
            }
            loan.remaining_balance = or_overflow(
                loan.remaining_balance.checked_sub(amount),
                "Remaining balance",
            )?
            .max(Decimal::ZERO);
            if loan.remaining_balance.is_zero() {
                loan.status = LoanStatus::PaidOff;
            }
            loan.updated_at = at;
            Ok(loan.clone())
        })
    }
}

/// In-memory loan application repository.
pub struct LoanApplicationRepository {
    store: Arc<LedgerStore>,
}

impl LoanApplicationRepository {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }
}

impl LoanApplicationRepositoryTrait for LoanApplicationRepository {
    fn create(&self, application: LoanApplication) -> Result<LoanApplication> {
        self.store
            .execute(move |ledger| ledger.loan_applications.insert(application))
    }

    fn get_by_id(&self, application_id: &str) -> Result<LoanApplication> {
        self.store
            .read(|ledger| ledger.loan_applications.require(application_id).cloned())?
    }

    fn find_by_user_id(&self, user_id: &str) -> Result<Vec<LoanApplication>> {
        let mut applications = self
            .store
            .read(|ledger| ledger.loan_applications.filter(|a| a.user_id == user_id))?;
        applications.reverse();
        applications.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
        Ok(applications)
    }

    fn update(&self, application: LoanApplication) -> Result<LoanApplication> {
        self.store
            .execute(move |ledger| ledger.loan_applications.replace(application))
    }
}
