//! Account domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::ledger::Entity;

/// Kind of account held by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Investment,
    /// Contra account: the balance is negative while money is owed.
    Loan,
}

impl AccountType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountType::Checking => "checking",
            AccountType::Savings => "savings",
            AccountType::Investment => "investment",
            AccountType::Loan => "loan",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "checking" => Ok(AccountType::Checking),
            "savings" => Ok(AccountType::Savings),
            "investment" => Ok(AccountType::Investment),
            "loan" => Ok(AccountType::Loan),
            other => Err(Error::Validation(ValidationError::UnknownVariant {
                kind: "account type",
                value: other.to_string(),
            })),
        }
    }
}

/// Domain model representing an account in the system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: Decimal,
    pub account_number: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Entity for Account {
    const NAME: &'static str = "Account";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input model for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    #[serde(default)]
    pub initial_balance: Decimal,
}

impl NewAccount {
    /// Validates the new account data.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::invalid("Account name cannot be empty"));
        }
        if self.initial_balance.is_sign_negative()
            && !self.initial_balance.is_zero()
            && self.account_type != AccountType::Loan
        {
            return Err(Error::invalid(
                "Initial balance cannot be negative for non-loan accounts",
            ));
        }
        Ok(())
    }
}
