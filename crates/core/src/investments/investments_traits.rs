use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::investments_model::{Investment, PriceUpdateSummary, TradeRequest, TradeResult};
use crate::errors::Result;
use crate::ledger::Ledger;

/// Storage contract for investment positions.
pub trait InvestmentRepositoryTrait: Send + Sync {
    fn get_by_id(&self, investment_id: &str) -> Result<Investment>;

    fn find_by_user_id(&self, user_id: &str) -> Result<Vec<Investment>>;

    fn find_by_symbol(&self, user_id: &str, symbol: &str) -> Result<Option<Investment>>;

    fn list(&self) -> Result<Vec<Investment>>;

    /// Position of `user_id` in `symbol` as seen by an enclosing write.
    fn find_by_symbol_in_transaction(
        &self,
        ledger: &Ledger,
        user_id: &str,
        symbol: &str,
    ) -> Option<Investment>;

    fn create_in_transaction(&self, ledger: &mut Ledger, investment: Investment)
        -> Result<Investment>;

    fn update_in_transaction(&self, ledger: &mut Ledger, investment: Investment)
        -> Result<Investment>;

    fn delete_in_transaction(&self, ledger: &mut Ledger, investment_id: &str) -> Result<()>;

    /// Sets the current price of every position in a priced symbol,
    /// whoever owns it. Returns how many positions changed.
    fn update_prices_in_transaction(
        &self,
        ledger: &mut Ledger,
        prices: &HashMap<String, Decimal>,
        at: NaiveDateTime,
    ) -> Result<usize>;
}

/// The trading desk.
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    /// Buys shares at the catalog price, debiting the account.
    async fn buy(&self, user_id: &str, request: TradeRequest) -> Result<TradeResult>;

    /// Sells shares at the catalog price, crediting the account.
    async fn sell(&self, user_id: &str, request: TradeRequest) -> Result<TradeResult>;

    fn get_user_portfolio(&self, user_id: &str) -> Result<Vec<Investment>>;

    /// Market value of all positions of a user.
    fn get_portfolio_value(&self, user_id: &str) -> Result<Decimal>;

    /// Cost basis of all positions of a user.
    fn get_portfolio_cost(&self, user_id: &str) -> Result<Decimal>;
}

/// Applies price batches to the catalog and to every open position.
pub trait PriceUpdateServiceTrait: Send + Sync {
    /// Writes the given prices in one ledger write.
    fn apply_prices(&self, prices: &HashMap<String, Decimal>) -> Result<PriceUpdateSummary>;

    /// Draws a simulated price for every catalog asset and applies the batch.
    fn run_cycle(&self) -> Result<PriceUpdateSummary>;
}
