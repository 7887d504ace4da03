use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use financehub_core::{
    accounts as core_accounts, errors::Error as CoreError, investments as core_investments,
    loans::LoanPreview,
};

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    pub balance: Decimal,
    pub account_number: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_accounts::Account> for Account {
    fn from(a: core_accounts::Account) -> Self {
        Self {
            id: a.id,
            user_id: a.user_id,
            name: a.name,
            account_type: a.account_type.to_string(),
            balance: a.balance,
            account_number: a.account_number,
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub initial_balance: Decimal,
}

impl NewAccount {
    /// Converts into the core request for an already resolved owner.
    pub fn into_core(self, user_id: String) -> Result<core_accounts::NewAccount, CoreError> {
        Ok(core_accounts::NewAccount {
            user_id,
            name: self.name,
            account_type: self.account_type.parse()?,
            initial_balance: self.initial_balance,
        })
    }
}

/// Position with its market-derived figures.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub user_id: String,
    pub symbol: String,
    pub name: String,
    pub shares: Decimal,
    pub purchase_price: Decimal,
    pub current_price: Decimal,
    pub current_value: Decimal,
    pub profit_loss: Decimal,
    pub profit_loss_percentage: Decimal,
    pub purchase_date: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_investments::Investment> for Investment {
    fn from(i: core_investments::Investment) -> Self {
        Self {
            current_value: i.current_value(),
            profit_loss: i.profit_loss(),
            profit_loss_percentage: i.profit_loss_percentage(),
            id: i.id,
            user_id: i.user_id,
            symbol: i.symbol,
            name: i.name,
            shares: i.shares,
            purchase_price: i.purchase_price,
            current_price: i.current_price,
            purchase_date: i.purchase_date,
            updated_at: i.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TradeOrder {
    pub user_id: String,
    pub account_id: String,
    pub symbol: String,
    pub shares: Decimal,
}

impl From<TradeOrder> for core_investments::TradeRequest {
    fn from(order: TradeOrder) -> Self {
        Self {
            account_id: order.account_id,
            symbol: order.symbol,
            shares: order.shares,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TradeResponse {
    pub investment: Option<Investment>,
    pub transaction_id: String,
    pub reference_number: Option<String>,
    pub amount: Decimal,
    pub message: String,
}

impl From<core_investments::TradeResult> for TradeResponse {
    fn from(result: core_investments::TradeResult) -> Self {
        Self {
            investment: result.investment.map(Investment::from),
            transaction_id: result.transaction.id,
            reference_number: result.transaction.reference_number,
            amount: result.transaction.amount,
            message: result.message,
        }
    }
}

fn default_rate() -> Decimal {
    Decimal::from(5)
}

fn default_term_years() -> Decimal {
    Decimal::from(5)
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoanCalculatorRequest {
    pub amount: Decimal,
    /// Annual percentage rate.
    #[serde(default = "default_rate")]
    pub rate: Decimal,
    #[serde(default = "default_term_years")]
    pub term_years: Decimal,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoanCalculatorResponse {
    pub monthly_payment: Decimal,
    pub total_payment: Decimal,
    pub total_interest: Decimal,
    pub term_months: u32,
}

impl LoanCalculatorResponse {
    pub fn new(preview: LoanPreview, term_months: u32) -> Self {
        Self {
            monthly_payment: preview.monthly_payment,
            total_payment: preview.total_payment,
            total_interest: preview.total_interest,
            term_months,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoanPaymentRequest {
    pub user_id: String,
    pub amount: Decimal,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewTransactionRequest {
    pub user_id: String,
    pub account_id: String,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OwnerRequest {
    pub user_id: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CountResponse {
    pub count: usize,
}
