//! Transaction domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::ledger::Entity;

/// A signed movement of money on one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub account_id: String,
    /// Negative for debits, positive for credits. Never zero.
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    pub transaction_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub reference_number: Option<String>,
}

impl Transaction {
    pub fn is_debit(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    pub fn is_credit(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }
}

impl Entity for Transaction {
    const NAME: &'static str = "Transaction";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Instruction for the balance transfer primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub account_id: String,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
    /// Explicit reference number; generated from `reference_prefix` when absent.
    pub reference_number: Option<String>,
    pub reference_prefix: Option<String>,
    /// Booking time; defaults to now. Used to backfill history.
    pub occurred_at: Option<NaiveDateTime>,
}

impl Transfer {
    pub fn new(
        account_id: impl Into<String>,
        amount: Decimal,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            account_id: account_id.into(),
            amount,
            description: description.into(),
            category: category.into(),
            reference_number: None,
            reference_prefix: None,
            occurred_at: None,
        }
    }

    pub fn with_reference(mut self, reference_number: impl Into<String>) -> Self {
        self.reference_number = Some(reference_number.into());
        self
    }

    pub fn with_reference_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.reference_prefix = Some(prefix.into());
        self
    }

    pub fn occurred_at(mut self, at: NaiveDateTime) -> Self {
        self.occurred_at = Some(at);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.account_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "accountId".to_string(),
            )));
        }
        if self.amount.is_zero() {
            return Err(Error::invalid("Transaction amount cannot be zero"));
        }
        if self.description.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "description".to_string(),
            )));
        }
        if self.category.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "category".to_string(),
            )));
        }
        Ok(())
    }
}

/// User-facing request to record a transaction on one of their accounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub account_id: String,
    pub amount: Decimal,
    pub description: String,
    pub category: String,
}
