use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::transactions_model::Transaction;
use super::transactions_traits::TransactionRepositoryTrait;
use crate::errors::Result;
use crate::ledger::{Ledger, LedgerStore};

/// In-memory transaction repository.
pub struct TransactionRepository {
    store: Arc<LedgerStore>,
}

impl TransactionRepository {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    fn in_range(
        &self,
        account_ids: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Transaction>> {
        self.store.read(|ledger| {
            ledger.transactions.filter(|t| {
                account_ids.contains(&t.account_id)
                    && t.transaction_date >= start
                    && t.transaction_date < end
            })
        })
    }
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn create_in_transaction(
        &self,
        ledger: &mut Ledger,
        transaction: Transaction,
    ) -> Result<Transaction> {
        ledger.transactions.insert(transaction)
    }

    fn get_by_id(&self, transaction_id: &str) -> Result<Transaction> {
        self.store
            .read(|ledger| ledger.transactions.require(transaction_id).cloned())?
    }

    fn find_by_account_ids(
        &self,
        account_ids: &[String],
        limit: Option<usize>,
    ) -> Result<Vec<Transaction>> {
        let mut transactions = self.store.read(|ledger| {
            ledger
                .transactions
                .filter(|t| account_ids.contains(&t.account_id))
        })?;
        // Ties keep reverse insertion order.
        transactions.reverse();
        transactions.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
        if let Some(limit) = limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    fn find_by_category(&self, account_id: &str, category: &str) -> Result<Vec<Transaction>> {
        self.store.read(|ledger| {
            ledger
                .transactions
                .filter(|t| t.account_id == account_id && t.category == category)
        })
    }

    fn find_by_date_range(
        &self,
        account_ids: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<Transaction>> {
        self.in_range(account_ids, start, end)
    }

    fn sum_expenses(
        &self,
        account_ids: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal> {
        let total: Decimal = self
            .in_range(account_ids, start, end)?
            .iter()
            .filter(|t| t.is_debit())
            .map(|t| t.amount)
            .sum();
        Ok(total.abs())
    }

    fn sum_income(
        &self,
        account_ids: &[String],
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Decimal> {
        Ok(self
            .in_range(account_ids, start, end)?
            .iter()
            .filter(|t| t.is_credit())
            .map(|t| t.amount)
            .sum())
    }
}
