use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::accounts_model::{Account, AccountType, NewAccount};
use super::accounts_traits::{AccountRepositoryTrait, AccountServiceTrait};
use crate::errors::{Error, Result};
use crate::notifications::{NotificationKind, NotificationServiceTrait};

/// Service for managing accounts
pub struct AccountService {
    repository: Arc<dyn AccountRepositoryTrait>,
    notification_service: Arc<dyn NotificationServiceTrait>,
}

impl AccountService {
    /// Creates a new AccountService instance
    pub fn new(
        repository: Arc<dyn AccountRepositoryTrait>,
        notification_service: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            repository,
            notification_service,
        }
    }
}

#[async_trait]
impl AccountServiceTrait for AccountService {
    async fn create_account(&self, new_account: NewAccount) -> Result<Account> {
        debug!(
            "Creating {} account '{}' for user {}",
            new_account.account_type, new_account.name, new_account.user_id
        );
        let account = self.repository.create(new_account)?;

        self.notification_service.notify(
            &account.user_id,
            "New Account Created",
            &format!("Account '{}' was created successfully", account.name),
            NotificationKind::Success,
        );
        Ok(account)
    }

    fn get_account(&self, account_id: &str) -> Result<Account> {
        self.repository.get_by_id(account_id)
    }

    fn get_owned_account(&self, user_id: &str, account_id: &str) -> Result<Account> {
        let account = self.repository.get_by_id(account_id)?;
        if account.user_id != user_id {
            return Err(Error::not_found("Account", account_id));
        }
        Ok(account)
    }

    fn get_user_accounts(&self, user_id: &str) -> Result<Vec<Account>> {
        self.repository.find_by_user_id(user_id)
    }

    fn get_accounts_by_type(
        &self,
        user_id: &str,
        account_type: AccountType,
    ) -> Result<Vec<Account>> {
        self.repository.find_by_type(user_id, account_type)
    }

    fn get_total_balance(&self, user_id: &str, exclude_loan_accounts: bool) -> Result<Decimal> {
        Ok(self
            .repository
            .find_by_user_id(user_id)?
            .iter()
            .filter(|a| !(exclude_loan_accounts && a.account_type == AccountType::Loan))
            .map(|a| a.balance)
            .sum())
    }
}
