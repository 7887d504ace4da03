use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::transactions_model::{NewTransaction, Transaction, Transfer};
use crate::errors::Result;
use crate::ledger::Ledger;

/// Storage contract for transactions.
pub trait TransactionRepositoryTrait: Send + Sync {
    fn create_in_transaction(
        &self,
        ledger: &mut Ledger,
        transaction: Transaction,
    ) -> Result<Transaction>;

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction>;

    /// Transactions of the given accounts, newest first.
    fn find_by_account_ids(
        &self,
        account_ids: &[String],
        limit: Option<usize>,
    ) -> Result<Vec<Transaction>>;

    fn find_by_category(&self, account_id: &str, category: &str) -> Result<Vec<Transaction>>;

    /// Transactions booked in `[start, end)`.
    fn find_by_date_range(
        &self,
        account_ids: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Transaction>>;

    /// Absolute sum of debits booked in `[start, end)`.
    fn sum_expenses(
        &self,
        account_ids: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal>;

    /// Sum of credits booked in `[start, end)`.
    fn sum_income(
        &self,
        account_ids: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal>;
}

/// Service contract for the balance transfer primitive and transaction queries.
#[async_trait]
pub trait TransactionServiceTrait: Send + Sync {
    /// Moves `transfer.amount` onto the account and records the matching
    /// transaction atomically, then notifies the owner of large amounts.
    async fn transfer(&self, transfer: Transfer) -> Result<Transaction>;

    /// The ledger half of [`TransactionServiceTrait::transfer`], for callers
    /// composing a larger atomic write. Returns the transaction and the owner id.
    fn transfer_in_transaction(
        &self,
        ledger: &mut Ledger,
        transfer: Transfer,
    ) -> Result<(Transaction, String)>;

    /// Emits the large-transaction notification when the threshold is met.
    fn notify_if_large(&self, user_id: &str, transaction: &Transaction);

    /// Records a transaction on an account owned by `user_id`.
    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction>;

    fn get_user_recent_transactions(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Transaction>>;

    /// Expenses of the calendar month containing `at`.
    fn get_monthly_expenses(&self, account_ids: &[String], at: NaiveDateTime) -> Result<Decimal>;

    /// Income of the calendar month containing `at`.
    fn get_monthly_income(&self, account_ids: &[String], at: NaiveDateTime) -> Result<Decimal>;

    /// Month-over-month change of expenses in percent.
    fn get_expense_variation(&self, account_ids: &[String], at: NaiveDateTime) -> Result<Decimal>;
}
