use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::loans_model::{
    Loan, LoanApplication, LoanApplicationReceipt, LoanApplicationRequest, LoanLimits, LoanStatus,
    NewLoan,
};
use crate::errors::Result;
use crate::ledger::Ledger;

/// Storage contract for loans.
pub trait LoanRepositoryTrait: Send + Sync {
    fn create_in_transaction(&self, ledger: &mut Ledger, loan: Loan) -> Result<Loan>;

    fn get_by_id(&self, loan_id: &str) -> Result<Loan>;

    fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Loan>>;

    fn find_by_status(&self, user_id: &str, status: LoanStatus) -> Result<Vec<Loan>>;

    /// Lowers the remaining balance by `amount`, clamping at zero. A loan
    /// reaching zero becomes `paid_off`.
    fn apply_payment(&self, loan_id: &str, amount: Decimal, at: NaiveDateTime) -> Result<Loan>;
}

/// Storage contract for loan applications.
pub trait LoanApplicationRepositoryTrait: Send + Sync {
    fn create(&self, application: LoanApplication) -> Result<LoanApplication>;

    fn get_by_id(&self, application_id: &str) -> Result<LoanApplication>;

    /// Applications of a user, newest first.
    fn find_by_user_id(&self, user_id: &str) -> Result<Vec<LoanApplication>>;

    fn update(&self, application: LoanApplication) -> Result<LoanApplication>;
}

/// Loan provisioning and servicing.
#[async_trait]
pub trait LoanServiceTrait: Send + Sync {
    /// Books a loan: creates it, charges the user's loan account and credits
    /// the first checking account, then notifies the user.
    async fn create_loan(&self, new_loan: NewLoan) -> Result<Loan>;

    /// Same ledger effects as [`LoanServiceTrait::create_loan`] without the
    /// approval notification.
    async fn provision_loan(&self, new_loan: NewLoan) -> Result<Loan>;

    fn get_loan(&self, loan_id: &str) -> Result<Loan>;

    fn get_user_loans(&self, user_id: &str) -> Result<Vec<Loan>>;

    fn get_active_loans(&self, user_id: &str) -> Result<Vec<Loan>>;

    /// Remaining balance across active loans.
    fn get_active_loan_balance(&self, user_id: &str) -> Result<Decimal>;

    /// Monthly installments across active loans.
    fn get_total_monthly_payments(&self, user_id: &str) -> Result<Decimal>;

    /// Records a repayment on a loan owned by `user_id`.
    async fn record_payment(&self, user_id: &str, loan_id: &str, amount: Decimal) -> Result<Loan>;

    fn get_loan_limits(&self, loan_type: &str) -> LoanLimits;
}

/// Submission and deferred evaluation of loan applications.
#[async_trait]
pub trait UnderwritingServiceTrait: Send + Sync {
    /// Stores the application, acknowledges it and schedules its evaluation.
    async fn submit_application(
        &self,
        request: LoanApplicationRequest,
    ) -> Result<LoanApplicationReceipt>;

    /// Evaluates a pending application and applies the decision.
    async fn process_application(&self, application_id: &str) -> Result<LoanApplication>;

    fn get_user_applications(&self, user_id: &str) -> Result<Vec<LoanApplication>>;
}

/// Hands submitted applications to whatever runs them later.
pub trait UnderwritingScheduler: Send + Sync {
    fn schedule(&self, application_id: &str) -> Result<()>;
}
