use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::dashboard_model::DashboardSummary;
use crate::accounts::{AccountServiceTrait, AccountType};
use crate::errors::Result;
use crate::investments::InvestmentServiceTrait;
use crate::loans::LoanServiceTrait;
use crate::transactions::TransactionServiceTrait;
use crate::utils::{format_signed_percent, now_naive, round_currency};

pub trait DashboardServiceTrait: Send + Sync {
    fn get_summary(&self, user_id: &str) -> Result<DashboardSummary>;

    /// Summary with monthly figures taken for the month containing `at`.
    fn get_summary_at(&self, user_id: &str, at: NaiveDateTime) -> Result<DashboardSummary>;
}

/// Aggregates accounts, positions, loans and transactions for a user.
pub struct DashboardService {
    account_service: Arc<dyn AccountServiceTrait>,
    investment_service: Arc<dyn InvestmentServiceTrait>,
    loan_service: Arc<dyn LoanServiceTrait>,
    transaction_service: Arc<dyn TransactionServiceTrait>,
}

impl DashboardService {
    pub fn new(
        account_service: Arc<dyn AccountServiceTrait>,
        investment_service: Arc<dyn InvestmentServiceTrait>,
        loan_service: Arc<dyn LoanServiceTrait>,
        transaction_service: Arc<dyn TransactionServiceTrait>,
    ) -> Self {
        Self {
            account_service,
            investment_service,
            loan_service,
            transaction_service,
        }
    }
}

impl DashboardServiceTrait for DashboardService {
    fn get_summary(&self, user_id: &str) -> Result<DashboardSummary> {
        self.get_summary_at(user_id, now_naive())
    }

    fn get_summary_at(&self, user_id: &str, at: NaiveDateTime) -> Result<DashboardSummary> {
        let accounts = self.account_service.get_user_accounts(user_id)?;
        let total_balance: Decimal = accounts
            .iter()
            .filter(|a| a.account_type != AccountType::Loan)
            .map(|a| a.balance)
            .sum();
        let spending_accounts: Vec<String> = accounts
            .into_iter()
            .filter(|a| a.account_type != AccountType::Loan)
            .map(|a| a.id)
            .collect();

        let total_investments = self.investment_service.get_portfolio_value(user_id)?;
        let cost_basis = self.investment_service.get_portfolio_cost(user_id)?;
        let investment_growth = if cost_basis.is_zero() {
            Decimal::ZERO
        } else {
            (total_investments - cost_basis) / cost_basis * Decimal::ONE_HUNDRED
        };

        let active_loans = self.loan_service.get_active_loans(user_id)?;

        Ok(DashboardSummary {
            total_balance: round_currency(total_balance),
            total_investments: round_currency(total_investments),
            monthly_expenses: self
                .transaction_service
                .get_monthly_expenses(&spending_accounts, at)?,
            active_loan_balance: active_loans.iter().map(|l| l.remaining_balance).sum(),
            investment_growth: format_signed_percent(investment_growth),
            expense_variation: format_signed_percent(
                self.transaction_service
                    .get_expense_variation(&spending_accounts, at)?,
            ),
            active_loans_count: active_loans.len(),
        })
    }
}
