use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::{debug, info};
use rust_decimal::Decimal;

use super::transactions_model::{NewTransaction, Transaction, Transfer};
use super::transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
use crate::accounts::AccountRepositoryTrait;
use crate::constants::DEFAULT_LIST_LIMIT;
use crate::errors::{Error, Result};
use crate::ledger::{Ledger, LedgerStore};
use crate::notifications::{NotificationKind, NotificationServiceTrait};
use crate::settings::LedgerSettings;
use crate::utils::{
    format_currency, month_bounds, new_id, now_naive, previous_month_bounds, reference_number,
    round_currency,
};

/// Service owning the balance transfer primitive.
pub struct TransactionService {
    store: Arc<LedgerStore>,
    repository: Arc<dyn TransactionRepositoryTrait>,
    account_repository: Arc<dyn AccountRepositoryTrait>,
    notification_service: Arc<dyn NotificationServiceTrait>,
    settings: LedgerSettings,
}

impl TransactionService {
    pub fn new(
        store: Arc<LedgerStore>,
        repository: Arc<dyn TransactionRepositoryTrait>,
        account_repository: Arc<dyn AccountRepositoryTrait>,
        notification_service: Arc<dyn NotificationServiceTrait>,
        settings: LedgerSettings,
    ) -> Self {
        Self {
            store,
            repository,
            account_repository,
            notification_service,
            settings,
        }
    }
}

#[async_trait]
impl TransactionServiceTrait for TransactionService {
    async fn transfer(&self, transfer: Transfer) -> Result<Transaction> {
        let (transaction, user_id) = self
            .store
            .execute(|ledger| self.transfer_in_transaction(ledger, transfer))?;
        self.notify_if_large(&user_id, &transaction);
        Ok(transaction)
    }

    fn transfer_in_transaction(
        &self,
        ledger: &mut Ledger,
        transfer: Transfer,
    ) -> Result<(Transaction, String)> {
        transfer.validate()?;
        let now = now_naive();
        let amount = round_currency(transfer.amount);
        if amount.is_zero() {
            return Err(Error::invalid("Transaction amount cannot be zero"));
        }

        let account = self.account_repository.adjust_balance_in_transaction(
            ledger,
            &transfer.account_id,
            amount,
            now,
        )?;

        let reference = transfer.reference_number.unwrap_or_else(|| {
            let prefix = transfer
                .reference_prefix
                .as_deref()
                .unwrap_or(&self.settings.reference_prefix);
            reference_number(prefix)
        });

        let transaction = self.repository.create_in_transaction(
            ledger,
            Transaction {
                id: new_id(),
                account_id: account.id.clone(),
                amount,
                description: transfer.description.trim().to_string(),
                category: transfer.category.trim().to_string(),
                transaction_date: transfer.occurred_at.unwrap_or(now),
                created_at: now,
                reference_number: Some(reference),
            },
        )?;
        debug!(
            "Applied {} to account {} (balance {})",
            amount, account.id, account.balance
        );
        Ok((transaction, account.user_id))
    }

    fn notify_if_large(&self, user_id: &str, transaction: &Transaction) {
        if transaction.amount.abs() < self.settings.large_transaction_threshold {
            return;
        }
        let (title, kind) = if transaction.is_credit() {
            ("Large Deposit", NotificationKind::Success)
        } else {
            ("Large Payment", NotificationKind::Info)
        };
        self.notification_service.notify(
            user_id,
            title,
            &format!(
                "{}: {}",
                transaction.description,
                format_currency(transaction.amount)
            ),
            kind,
        );
    }

    async fn create_transaction(
        &self,
        user_id: &str,
        new_transaction: NewTransaction,
    ) -> Result<Transaction> {
        let account = self
            .account_repository
            .get_by_id(&new_transaction.account_id)?;
        if account.user_id != user_id {
            return Err(Error::not_found("Account", &new_transaction.account_id));
        }
        info!(
            "Recording transaction of {} on account {}",
            new_transaction.amount, account.id
        );
        self.transfer(Transfer::new(
            account.id,
            new_transaction.amount,
            new_transaction.description,
            new_transaction.category,
        ))
        .await
    }

    fn get_user_recent_transactions(
        &self,
        user_id: &str,
        limit: Option<usize>,
    ) -> Result<Vec<Transaction>> {
        let account_ids: Vec<String> = self
            .account_repository
            .find_by_user_id(user_id)?
            .into_iter()
            .map(|a| a.id)
            .collect();
        self.repository
            .find_by_account_ids(&account_ids, Some(limit.unwrap_or(DEFAULT_LIST_LIMIT)))
    }

    fn get_monthly_expenses(&self, account_ids: &[String], at: NaiveDateTime) -> Result<Decimal> {
        let (start, end) = month_bounds(at);
        self.repository.sum_expenses(account_ids, start, end)
    }

    fn get_monthly_income(&self, account_ids: &[String], at: NaiveDateTime) -> Result<Decimal> {
        let (start, end) = month_bounds(at);
        self.repository.sum_income(account_ids, start, end)
    }

    fn get_expense_variation(&self, account_ids: &[String], at: NaiveDateTime) -> Result<Decimal> {
        let current = self.get_monthly_expenses(account_ids, at)?;
        let (start, end) = previous_month_bounds(at);
        let previous = self.repository.sum_expenses(account_ids, start, end)?;

        if previous.is_zero() {
            return Ok(if current.is_zero() {
                Decimal::ZERO
            } else {
                Decimal::ONE_HUNDRED
            });
        }
        Ok((current - previous) / previous * Decimal::ONE_HUNDRED)
    }
}
