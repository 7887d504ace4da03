use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;

use super::amortization::monthly_payment;
use super::loan_terms::LoanTerms;
use super::loans_model::{Loan, LoanLimits, LoanStatus, NewLoan};
use super::loans_traits::{LoanRepositoryTrait, LoanServiceTrait};
use crate::accounts::{AccountRepositoryTrait, AccountType, NewAccount, LOAN_ACCOUNT_NAME};
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::LedgerStore;
use crate::notifications::{NotificationKind, NotificationServiceTrait};
use crate::transactions::{Transaction, TransactionServiceTrait, Transfer};
use crate::utils::{format_currency, new_id, now_naive, round_currency};

const LOAN_CATEGORY: &str = "Loans";
const LOAN_REFERENCE_PREFIX: &str = "LOAN";

/// Service booking and servicing loans.
pub struct LoanService {
    store: Arc<LedgerStore>,
    repository: Arc<dyn LoanRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
    notification_service: Arc<dyn NotificationServiceTrait>,
}

impl LoanService {
    pub fn new(
        store: Arc<LedgerStore>,
        repository: Arc<dyn LoanRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
        notification_service: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            store,
            repository,
            account_repository,
            transaction_service,
            notification_service,
        }
    }

    /// Creates the loan, books the liability and disburses into the first
    /// checking account, all in one ledger write.
    fn book(&self, new_loan: NewLoan) -> Result<(Loan, Option<Transaction>)> {
        new_loan.validate()?;
        let amount = round_currency(new_loan.amount);
        let payment = monthly_payment(amount, new_loan.interest_rate, new_loan.term_months)?;

        let (loan, disbursement) = self.store.execute(|ledger| {
            let now = now_naive();
            let loan = self.repository.create_in_transaction(
                ledger,
                Loan {
                    id: new_id(),
                    user_id: new_loan.user_id.clone(),
                    loan_type: new_loan.loan_type,
                    amount,
                    interest_rate: new_loan.interest_rate,
                    term_months: new_loan.term_months,
                    monthly_payment: payment,
                    remaining_balance: amount,
                    status: LoanStatus::Active,
                    created_at: now,
                    updated_at: now,
                },
            )?;

            let loan_account = self
                .account_repository
                .find_by_type_in_transaction(ledger, &loan.user_id, AccountType::Loan)
                .into_iter()
                .next();
            match loan_account {
                Some(account) => {
                    self.account_repository.adjust_balance_in_transaction(
                        ledger,
                        &account.id,
                        -amount,
                        now,
                    )?;
                }
                None => {
                    self.account_repository.create_in_transaction(
                        ledger,
                        NewAccount {
                            user_id: loan.user_id.clone(),
                            name: LOAN_ACCOUNT_NAME.to_string(),
                            account_type: AccountType::Loan,
                            initial_balance: -amount,
                        },
                    )?;
                }
            }

            let checking = self
                .account_repository
                .find_by_type_in_transaction(ledger, &loan.user_id, AccountType::Checking)
                .into_iter()
                .next();
            let disbursement = match checking {
                Some(account) => {
                    let reference: String = loan.id.chars().take(8).collect();
                    let (transaction, _) = self.transaction_service.transfer_in_transaction(
                        ledger,
                        Transfer::new(
                            account.id,
                            amount,
                            format!("Loan disbursement ({})", loan.loan_type),
                            LOAN_CATEGORY,
                        )
                        .with_reference(format!("{}-{}", LOAN_REFERENCE_PREFIX, reference)),
                    )?;
                    Some(transaction)
                }
                None => None,
            };
            Ok((loan, disbursement))
        })?;

        info!(
            "Booked {} loan {} of {} for user {}",
            loan.loan_type, loan.id, loan.amount, loan.user_id
        );
        if let Some(transaction) = &disbursement {
            self.transaction_service
                .notify_if_large(&loan.user_id, transaction);
        }
        Ok((loan, disbursement))
    }
}

#[async_trait]
impl LoanServiceTrait for LoanService {
    async fn create_loan(&self, new_loan: NewLoan) -> Result<Loan> {
        let (loan, _) = self.book(new_loan)?;
        self.notification_service.notify(
            &loan.user_id,
            "Loan Approved",
            &format!(
                "Loan of {} approved and disbursed",
                format_currency(loan.amount)
            ),
            NotificationKind::Success,
        );
        Ok(loan)
    }

    async fn provision_loan(&self, new_loan: NewLoan) -> Result<Loan> {
        self.book(new_loan).map(|(loan, _)| loan)
    }

    fn get_loan(&self, loan_id: &str) -> Result<Loan> {
        self.repository.get_by_id(loan_id)
    }

    fn get_user_loans(&self, user_id: &str) -> Result<Vec<Loan>> {
        self.repository.find_by_user_id(user_id)
    }

    fn get_active_loans(&self, user_id: &str) -> Result<Vec<Loan>> {
        self.repository.find_by_status(user_id, LoanStatus::Active)
    }

    fn get_active_loan_balance(&self, user_id: &str) -> Result<Decimal> {
        Ok(self
            .get_active_loans(user_id)?
            .iter()
            .map(|l| l.remaining_balance)
            .sum())
    }

    fn get_total_monthly_payments(&self, user_id: &str) -> Result<Decimal> {
        Ok(self
            .get_active_loans(user_id)?
            .iter()
            .map(|l| l.monthly_payment)
            .sum())
    }

    async fn record_payment(&self, user_id: &str, loan_id: &str, amount: Decimal) -> Result<Loan> {
        if amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NotPositive {
                field: "amount",
                value: amount.to_string(),
            }));
        }
        let loan = self.repository.get_by_id(loan_id)?;
        if loan.user_id != user_id {
            return Err(Error::not_found("Loan", loan_id));
        }

        let updated = self
            .repository
            .apply_payment(loan_id, round_currency(amount), now_naive())?;
        if updated.status == LoanStatus::PaidOff {
            info!("Loan {} paid off", loan_id);
            self.notification_service.notify(
                user_id,
                "Loan Paid Off",
                &format!(
                    "Your {} loan of {} is fully repaid",
                    updated.loan_type,
                    format_currency(updated.amount)
                ),
                NotificationKind::Success,
            );
        }
        Ok(updated)
    }

    fn get_loan_limits(&self, loan_type: &str) -> LoanLimits {
        let terms = LoanTerms::lookup(loan_type);
        LoanLimits {
            loan_type: loan_type.trim().to_lowercase(),
            min_amount: terms.min_amount,
            max_amount: terms.max_amount,
        }
    }
}
