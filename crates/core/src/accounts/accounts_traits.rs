//! Account repository and service traits.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::accounts_model::{Account, AccountType, NewAccount};
use crate::errors::Result;
use crate::ledger::Ledger;

/// Trait defining the contract for Account repository operations.
///
/// The `*_in_transaction` methods operate on the journaled ledger handed out by
/// `LedgerStore::execute`, so services can compose them atomically.
pub trait AccountRepositoryTrait: Send + Sync {
    /// Creates an account, generating its id and account number.
    fn create(&self, new_account: NewAccount) -> Result<Account>;

    /// Creates an account inside an enclosing ledger transaction.
    fn create_in_transaction(&self, ledger: &mut Ledger, new_account: NewAccount)
        -> Result<Account>;

    /// Adds `delta` to the balance of an account inside a ledger transaction.
    fn adjust_balance_in_transaction(
        &self,
        ledger: &mut Ledger,
        account_id: &str,
        delta: Decimal,
        at: NaiveDateTime,
    ) -> Result<Account>;

    /// Accounts of a user with the given type, as seen by an enclosing write.
    fn find_by_type_in_transaction(
        &self,
        ledger: &Ledger,
        user_id: &str,
        account_type: AccountType,
    ) -> Vec<Account>;

    fn get_by_id(&self, account_id: &str) -> Result<Account>;

    /// Accounts of a user in creation order.
    fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Account>>;

    /// Accounts of a user with the given type, in creation order.
    fn find_by_type(&self, user_id: &str, account_type: AccountType) -> Result<Vec<Account>>;

    fn find_by_account_number(&self, account_number: &str) -> Result<Option<Account>>;
}

/// Trait defining the contract for Account service operations.
#[async_trait]
pub trait AccountServiceTrait: Send + Sync {
    /// Creates a new account with business validation and notifies the owner.
    async fn create_account(&self, new_account: NewAccount) -> Result<Account>;

    fn get_account(&self, account_id: &str) -> Result<Account>;

    /// Returns the account only if it belongs to `user_id`.
    fn get_owned_account(&self, user_id: &str, account_id: &str) -> Result<Account>;

    fn get_user_accounts(&self, user_id: &str) -> Result<Vec<Account>>;

    fn get_accounts_by_type(&self, user_id: &str, account_type: AccountType)
        -> Result<Vec<Account>>;

    /// Sums balances of a user's accounts, optionally leaving out loan accounts.
    fn get_total_balance(&self, user_id: &str, exclude_loan_accounts: bool) -> Result<Decimal>;
}
