use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Headline figures for a user's dashboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Sum of balances excluding loan accounts.
    pub total_balance: Decimal,
    pub total_investments: Decimal,
    /// This month's expenses on non-loan accounts.
    pub monthly_expenses: Decimal,
    pub active_loan_balance: Decimal,
    /// Unrealized portfolio growth, e.g. `+4.2%`.
    pub investment_growth: String,
    /// Expenses versus last month, e.g. `-3.3%`.
    pub expense_variation: String,
    pub active_loans_count: usize,
}
