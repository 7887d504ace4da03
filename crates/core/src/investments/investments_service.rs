use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;

use super::investments_model::{Investment, TradeRequest, TradeResult};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
use crate::assets::AvailableAsset;
use crate::errors::{Error, Result};
use crate::ledger::{Ledger, LedgerStore};
use crate::notifications::{NotificationKind, NotificationServiceTrait};
use crate::transactions::{TransactionServiceTrait, Transfer};
use crate::utils::{
    format_currency, new_id, now_naive, or_overflow, round_currency, round_price,
};

const INVESTMENT_CATEGORY: &str = "Investments";
const BUY_REFERENCE_PREFIX: &str = "BUY";
const SELL_REFERENCE_PREFIX: &str = "SELL";

/// Service executing buy and sell orders against the ledger.
pub struct InvestmentService {
    store: Arc<LedgerStore>,
    repository: Arc<dyn InvestmentRepositoryTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
    notification_service: Arc<dyn NotificationServiceTrait>,
}

impl InvestmentService {
    pub fn new(
        store: Arc<LedgerStore>,
        repository: Arc<dyn InvestmentRepositoryTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
        notification_service: Arc<dyn NotificationServiceTrait>,
    ) -> Self {
        Self {
            store,
            repository,
            transaction_service,
            notification_service,
        }
    }

    fn require_owned_account(ledger: &Ledger, user_id: &str, account_id: &str) -> Result<Decimal> {
        match ledger.accounts.get(account_id) {
            Some(account) if account.user_id == user_id => Ok(account.balance),
            _ => Err(Error::not_found("Account", account_id)),
        }
    }

    fn require_asset(ledger: &Ledger, symbol: &str) -> Result<AvailableAsset> {
        ledger
            .assets
            .values()
            .find(|a| a.symbol == symbol)
            .cloned()
            .ok_or_else(|| Error::not_found("Asset", symbol))
    }

    /// Value of an order at the current price, rounded to cents.
    fn order_value(shares: Decimal, price: Decimal) -> Result<Decimal> {
        let value = round_currency(or_overflow(shares.checked_mul(price), "Order value")?);
        if value.is_zero() {
            return Err(Error::invalid(format!(
                "Order of {} shares at {} is worth less than one cent",
                shares.normalize(),
                format_currency(price)
            )));
        }
        Ok(value)
    }

    fn after_trade(&self, user_id: &str, title: &str, result: &TradeResult) {
        self.notification_service.notify(
            user_id,
            title,
            &format!(
                "{}: {}",
                result.message,
                format_currency(result.transaction.amount.abs())
            ),
            NotificationKind::Success,
        );
        self.transaction_service
            .notify_if_large(user_id, &result.transaction);
    }
}

#[async_trait]
impl InvestmentServiceTrait for InvestmentService {
    async fn buy(&self, user_id: &str, request: TradeRequest) -> Result<TradeResult> {
        let (symbol, shares) = request.normalized()?;

        let result = self.store.execute(|ledger| {
            let balance = Self::require_owned_account(ledger, user_id, &request.account_id)?;
            let asset = Self::require_asset(ledger, &symbol)?;
            let cost = Self::order_value(shares, asset.current_price)?;
            if cost > balance {
                return Err(Error::InsufficientFunds {
                    account_id: request.account_id.clone(),
                    required: cost,
                    available: balance,
                });
            }

            let now = now_naive();
            let investment = match self
                .repository
                .find_by_symbol_in_transaction(ledger, user_id, &symbol)
            {
                Some(mut position) => {
                    let total_shares =
                        or_overflow(position.shares.checked_add(shares), "Share count")?;
                    let total_cost = or_overflow(
                        position
                            .shares
                            .checked_mul(position.purchase_price)
                            .and_then(|held| held.checked_add(cost)),
                        "Position cost",
                    )?;
                    position.purchase_price = round_price(total_cost / total_shares);
                    position.shares = total_shares;
                    position.current_price = asset.current_price;
                    position.updated_at = now;
                    self.repository.update_in_transaction(ledger, position)?
                }
                None => self.repository.create_in_transaction(
                    ledger,
                    Investment {
                        id: new_id(),
                        user_id: user_id.to_string(),
                        symbol: symbol.clone(),
                        name: asset.name.clone(),
                        shares,
                        purchase_price: asset.current_price,
                        current_price: asset.current_price,
                        purchase_date: now,
                        updated_at: now,
                    },
                )?,
            };

            let (transaction, _) = self.transaction_service.transfer_in_transaction(
                ledger,
                Transfer::new(
                    &request.account_id,
                    -cost,
                    format!("Buy {} shares of {}", shares.normalize(), symbol),
                    INVESTMENT_CATEGORY,
                )
                .with_reference_prefix(BUY_REFERENCE_PREFIX),
            )?;

            Ok(TradeResult {
                investment: Some(investment),
                transaction,
                message: format!(
                    "Successfully purchased {} shares of {}",
                    shares.normalize(),
                    symbol
                ),
            })
        })?;

        info!("User {} bought {} {}", user_id, shares, symbol);
        self.after_trade(user_id, "Investment Purchased", &result);
        Ok(result)
    }

    async fn sell(&self, user_id: &str, request: TradeRequest) -> Result<TradeResult> {
        let (symbol, shares) = request.normalized()?;

        let result = self.store.execute(|ledger| {
            Self::require_owned_account(ledger, user_id, &request.account_id)?;
            let mut position = self
                .repository
                .find_by_symbol_in_transaction(ledger, user_id, &symbol)
                .ok_or_else(|| Error::not_found("Investment", &symbol))?;
            if position.shares < shares {
                return Err(Error::InsufficientShares {
                    symbol: symbol.clone(),
                    requested: shares,
                    held: position.shares,
                });
            }
            let asset = Self::require_asset(ledger, &symbol)?;
            let proceeds = Self::order_value(shares, asset.current_price)?;

            position.shares -= shares;
            position.current_price = asset.current_price;
            position.updated_at = now_naive();
            let investment = if position.shares.is_zero() {
                self.repository.delete_in_transaction(ledger, &position.id)?;
                None
            } else {
                Some(self.repository.update_in_transaction(ledger, position)?)
            };

            let (transaction, _) = self.transaction_service.transfer_in_transaction(
                ledger,
                Transfer::new(
                    &request.account_id,
                    proceeds,
                    format!("Sell {} shares of {}", shares.normalize(), symbol),
                    INVESTMENT_CATEGORY,
                )
                .with_reference_prefix(SELL_REFERENCE_PREFIX),
            )?;

            Ok(TradeResult {
                investment,
                transaction,
                message: format!(
                    "Successfully sold {} shares of {}",
                    shares.normalize(),
                    symbol
                ),
            })
        })?;

        info!("User {} sold {} {}", user_id, shares, symbol);
        self.after_trade(user_id, "Investment Sold", &result);
        Ok(result)
    }

    fn get_user_portfolio(&self, user_id: &str) -> Result<Vec<Investment>> {
        self.repository.find_by_user_id(user_id)
    }

    fn get_portfolio_value(&self, user_id: &str) -> Result<Decimal> {
        Ok(self
            .repository
            .find_by_user_id(user_id)?
            .iter()
            .map(Investment::current_value)
            .sum())
    }

    fn get_portfolio_cost(&self, user_id: &str) -> Result<Decimal> {
        Ok(self
            .repository
            .find_by_user_id(user_id)?
            .iter()
            .map(Investment::cost_basis)
            .sum())
    }
}
