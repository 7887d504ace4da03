//! Loan and loan application models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::ledger::Entity;
use crate::utils::round_currency;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Personal,
    Mortgage,
    Auto,
    Business,
}

impl LoanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanType::Personal => "personal",
            LoanType::Mortgage => "mortgage",
            LoanType::Auto => "auto",
            LoanType::Business => "business",
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Ok(LoanType::Personal),
            "mortgage" => Ok(LoanType::Mortgage),
            "auto" => Ok(LoanType::Auto),
            "business" => Ok(LoanType::Business),
            other => Err(Error::Validation(ValidationError::UnknownVariant {
                kind: "loan type",
                value: other.to_string(),
            })),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LoanStatus {
    #[default]
    Active,
    PaidOff,
    Defaulted,
    Pending,
}

/// A provisioned loan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub amount: Decimal,
    pub interest_rate: Decimal,
    pub term_months: u32,
    pub monthly_payment: Decimal,
    /// Never exceeds `amount` and only decreases.
    pub remaining_balance: Decimal,
    pub status: LoanStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Loan {
    /// Share of the principal already repaid, in percent.
    pub fn progress_percentage(&self) -> Decimal {
        if self.amount.is_zero() {
            return Decimal::ONE_HUNDRED;
        }
        round_currency((self.amount - self.remaining_balance) / self.amount * Decimal::ONE_HUNDRED)
    }

    /// Estimated payments left, 0 once nothing remains.
    pub fn remaining_months(&self) -> u32 {
        if self.remaining_balance <= Decimal::ZERO || self.monthly_payment <= Decimal::ZERO {
            return 0;
        }
        (self.remaining_balance / self.monthly_payment)
            .floor()
            .to_u32()
            .map_or(u32::MAX, |m| m.saturating_add(1))
    }

    pub fn is_active(&self) -> bool {
        self.status == LoanStatus::Active
    }
}

impl Entity for Loan {
    const NAME: &'static str = "Loan";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input for provisioning a loan without underwriting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    pub user_id: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub amount: Decimal,
    pub interest_rate: Decimal,
    pub term_months: u32,
}

impl NewLoan {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NotPositive {
                field: "amount",
                value: self.amount.to_string(),
            }));
        }
        if self.interest_rate < Decimal::ZERO {
            return Err(Error::invalid("Interest rate cannot be negative"));
        }
        if self.term_months == 0 {
            return Err(Error::Validation(ValidationError::NotPositive {
                field: "termMonths",
                value: "0".to_string(),
            }));
        }
        Ok(())
    }
}

/// Declared employment situation of an applicant.
///
/// Unrecognised values are preserved so they can be reported back; they never
/// satisfy the approval policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
    Student,
    Other(String),
}

impl EmploymentStatus {
    /// Whether the status qualifies for a loan.
    pub fn is_eligible(&self) -> bool {
        matches!(self, EmploymentStatus::Employed | EmploymentStatus::SelfEmployed)
    }

    pub fn as_str(&self) -> &str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::Retired => "retired",
            EmploymentStatus::Student => "student",
            EmploymentStatus::Other(raw) => raw,
        }
    }
}

impl From<String> for EmploymentStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "employed" => EmploymentStatus::Employed,
            "self_employed" => EmploymentStatus::SelfEmployed,
            "unemployed" => EmploymentStatus::Unemployed,
            "retired" => EmploymentStatus::Retired,
            "student" => EmploymentStatus::Student,
            _ => EmploymentStatus::Other(value),
        }
    }
}

impl From<&str> for EmploymentStatus {
    fn from(value: &str) -> Self {
        EmploymentStatus::from(value.to_string())
    }
}

impl From<EmploymentStatus> for String {
    fn from(value: EmploymentStatus) -> Self {
        match value {
            EmploymentStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoanApplicationStatus {
    #[default]
    Pending,
    Evaluating,
    Approved,
    Rejected,
}

impl LoanApplicationStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LoanApplicationStatus::Approved | LoanApplicationStatus::Rejected
        )
    }
}

/// A loan request as submitted by a client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplicationRequest {
    pub user_id: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub amount: Decimal,
    #[serde(default)]
    pub purpose: Option<String>,
    /// Gross annual income.
    pub income: Decimal,
    pub employment_status: EmploymentStatus,
    #[serde(default)]
    pub term_months: Option<u32>,
}

impl LoanApplicationRequest {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NotPositive {
                field: "amount",
                value: self.amount.to_string(),
            }));
        }
        if self.income <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NotPositive {
                field: "income",
                value: self.income.to_string(),
            }));
        }
        if self.term_months == Some(0) {
            return Err(Error::Validation(ValidationError::NotPositive {
                field: "termMonths",
                value: "0".to_string(),
            }));
        }
        if self.employment_status.as_str().trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "employmentStatus".to_string(),
            )));
        }
        Ok(())
    }
}

/// Stored record of an application and its outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub amount: Decimal,
    pub purpose: String,
    pub income: Decimal,
    pub employment_status: EmploymentStatus,
    pub term_months: Option<u32>,
    pub status: LoanApplicationStatus,
    pub submitted_at: NaiveDateTime,
    pub decided_at: Option<NaiveDateTime>,
    pub dti_ratio: Option<Decimal>,
    pub rejection_reason: Option<String>,
    pub loan_id: Option<String>,
}

impl Entity for LoanApplication {
    const NAME: &'static str = "LoanApplication";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Synchronous acknowledgement of a submitted application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplicationReceipt {
    pub id: String,
    #[serde(rename = "type")]
    pub loan_type: LoanType,
    pub amount: Decimal,
    pub purpose: String,
    pub income: Decimal,
    pub employment_status: EmploymentStatus,
    pub status: LoanApplicationStatus,
    pub submitted_date: NaiveDateTime,
    pub message: String,
    pub estimated_processing_time: String,
}

/// Result of a debt-to-income evaluation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanEvaluation {
    pub approved: bool,
    /// Rounded to two decimals.
    pub dti_ratio: Decimal,
    pub monthly_payment: Decimal,
    pub monthly_income: Decimal,
    pub total_monthly_debt: Decimal,
    pub interest_rate: Decimal,
    pub term_months: u32,
    pub reason: String,
}

/// Amount limits for one loan type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanLimits {
    pub loan_type: String,
    pub min_amount: Decimal,
    pub max_amount: Decimal,
}
