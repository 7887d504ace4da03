use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::investments_model::Investment;
use super::investments_traits::InvestmentRepositoryTrait;
use crate::errors::{Error, Result};
use crate::ledger::{Ledger, LedgerStore};

/// In-memory position repository.
pub struct InvestmentRepository {
    store: Arc<LedgerStore>,
}

impl InvestmentRepository {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }
}

impl InvestmentRepositoryTrait for InvestmentRepository {
    fn get_by_id(&self, investment_id: &str) -> Result<Investment> {
        self.store
            .read(|ledger| ledger.investments.require(investment_id).cloned())?
    }

    fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Investment>> {
        self.store
            .read(|ledger| ledger.investments.filter(|i| i.user_id == user_id))
    }

    fn find_by_symbol(&self, user_id: &str, symbol: &str) -> Result<Option<Investment>> {
        self.store
            .read(|ledger| self.find_by_symbol_in_transaction(ledger, user_id, symbol))
    }

    fn list(&self) -> Result<Vec<Investment>> {
        self.store
            .read(|ledger| ledger.investments.values().cloned().collect())
    }

    fn find_by_symbol_in_transaction(
        &self,
        ledger: &Ledger,
        user_id: &str,
        symbol: &str,
    ) -> Option<Investment> {
        ledger
            .investments
            .values()
            .find(|i| i.user_id == user_id && i.symbol.eq_ignore_ascii_case(symbol))
            .cloned()
    }

    fn create_in_transaction(
        &self,
        ledger: &mut Ledger,
        investment: Investment,
    ) -> Result<Investment> {
        if self
            .find_by_symbol_in_transaction(ledger, &investment.user_id, &investment.symbol)
            .is_some()
        {
            return Err(Error::ConstraintViolation(format!(
                "Position in {} already exists",
                investment.symbol
            )));
        }
        ledger.investments.insert(investment)
    }

    fn update_in_transaction(
        &self,
        ledger: &mut Ledger,
        investment: Investment,
    ) -> Result<Investment> {
        ledger.investments.replace(investment)
    }

    fn delete_in_transaction(&self, ledger: &mut Ledger, investment_id: &str) -> Result<()> {
        ledger
            .investments
            .remove(investment_id)
            .map(|_| ())
            .ok_or_else(|| Error::not_found("Investment", investment_id))
    }

    fn update_prices_in_transaction(
        &self,
        ledger: &mut Ledger,
        prices: &HashMap<String, Decimal>,
        at: NaiveDateTime,
    ) -> Result<usize> {
        Ok(ledger.investments.update_where(
            |position| prices.contains_key(&position.symbol),
            |position| {
                if let Some(price) = prices.get(&position.symbol) {
                    position.current_price = *price;
                    position.updated_at = at;
                }
            },
        ))
    }
}
