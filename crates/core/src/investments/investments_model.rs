//! Investment position models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::ledger::Entity;
use crate::transactions::Transaction;
use crate::utils::{round_currency, round_shares};

/// A user's holding of one symbol.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub name: String,
    pub shares: Decimal,
    /// Weighted-average cost per share.
    pub purchase_price: Decimal,
    pub current_price: Decimal,
    pub purchase_date: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Investment {
    pub fn cost_basis(&self) -> Decimal {
        round_currency(self.shares * self.purchase_price)
    }

    pub fn current_value(&self) -> Decimal {
        round_currency(self.shares * self.current_price)
    }

    /// Unrealized profit or loss.
    pub fn profit_loss(&self) -> Decimal {
        self.current_value() - self.cost_basis()
    }

    pub fn profit_loss_percentage(&self) -> Decimal {
        let basis = self.cost_basis();
        if basis.is_zero() {
            return Decimal::ZERO;
        }
        round_currency(self.profit_loss() / basis * Decimal::ONE_HUNDRED)
    }
}

impl Entity for Investment {
    const NAME: &'static str = "Investment";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Buy or sell order against one of the user's accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub account_id: String,
    pub symbol: String,
    pub shares: Decimal,
}

impl TradeRequest {
    /// Validates the order and returns the normalized symbol and share count.
    pub fn normalized(&self) -> Result<(String, Decimal)> {
        let symbol = self.symbol.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        let shares = round_shares(self.shares);
        if shares <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NotPositive {
                field: "shares",
                value: self.shares.to_string(),
            }));
        }
        Ok((symbol, shares))
    }
}

/// Outcome of a trade. `investment` is `None` once a position is fully sold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TradeResult {
    pub investment: Option<Investment>,
    pub transaction: Transaction,
    pub message: String,
}

/// Counts from one applied price batch.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdateSummary {
    pub assets_updated: usize,
    pub positions_updated: usize,
}
