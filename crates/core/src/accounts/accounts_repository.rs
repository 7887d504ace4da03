use std::sync::Arc;

use chrono::NaiveDateTime;
use rand::Rng;
use rust_decimal::Decimal;

use super::accounts_constants::ACCOUNT_NUMBER_PREFIX;
use super::accounts_model::{Account, AccountType, NewAccount};
use super::accounts_traits::AccountRepositoryTrait;
use crate::errors::Result;
use crate::ledger::{Ledger, LedgerStore};
use crate::utils::{new_id, now_naive, or_overflow};

/// Repository for managing account data in the ledger store.
pub struct AccountRepository {
    store: Arc<LedgerStore>,
}

impl AccountRepository {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }
}

fn generate_account_number(ledger: &Ledger) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let candidate = format!(
            "{}{}{}",
            ACCOUNT_NUMBER_PREFIX,
            rng.gen_range(10..=99),
            rng.gen_range(100_000..=999_999)
        );
        if !ledger
            .accounts
            .values()
            .any(|a| a.account_number == candidate)
        {
            return candidate;
        }
    }
}

impl AccountRepositoryTrait for AccountRepository {
    fn create(&self, new_account: NewAccount) -> Result<Account> {
        self.store
            .execute(|ledger| self.create_in_transaction(ledger, new_account))
    }

    fn create_in_transaction(
        &self,
        ledger: &mut Ledger,
        new_account: NewAccount,
    ) -> Result<Account> {
        new_account.validate()?;
        let now = now_naive();
        let account = Account {
            id: new_id(),
            user_id: new_account.user_id,
            name: new_account.name.trim().to_string(),
            account_type: new_account.account_type,
            balance: new_account.initial_balance,
            account_number: generate_account_number(ledger),
            created_at: now,
            updated_at: now,
        };
        ledger.accounts.insert(account)
    }

    fn adjust_balance_in_transaction(
        &self,
        ledger: &mut Ledger,
        account_id: &str,
        delta: Decimal,
        at: NaiveDateTime,
    ) -> Result<Account> {
        let account = ledger.accounts.require_mut(account_id)?;
        account.balance = or_overflow(account.balance.checked_add(delta), "Account balance")?;
        account.updated_at = at;
        Ok(account.clone())
    }

    fn find_by_type_in_transaction(
        &self,
        ledger: &Ledger,
        user_id: &str,
        account_type: AccountType,
    ) -> Vec<Account> {
        ledger
            .accounts
            .filter(|a| a.user_id == user_id && a.account_type == account_type)
    }

    fn get_by_id(&self, account_id: &str) -> Result<Account> {
        self.store
            .read(|ledger| ledger.accounts.require(account_id).cloned())?
    }

    fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Account>> {
        self.store
            .read(|ledger| ledger.accounts.filter(|a| a.user_id == user_id))
    }

    fn find_by_type(&self, user_id: &str, account_type: AccountType) -> Result<Vec<Account>> {
        self.store
            .read(|ledger| self.find_by_type_in_transaction(ledger, user_id, account_type))
    }

    fn find_by_account_number(&self, account_number: &str) -> Result<Option<Account>> {
        self.store.read(|ledger| {
            ledger
                .accounts
                .values()
                .find(|a| a.account_number == account_number)
                .cloned()
        })
    }
}
