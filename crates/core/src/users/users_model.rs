//! User domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::ledger::Entity;

/// Domain model representing a registered user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    /// Stored as given; FinanceHub performs no authentication.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub name: String,
    pub email: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Entity for User {
    const NAME: &'static str = "User";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input model for registering a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
}

impl NewUser {
    /// Validates the registration payload.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "username".to_string(),
            )));
        }
        if self.email.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "email".to_string(),
            )));
        }
        if !self.email.contains('@') {
            return Err(Error::invalid("Valid email is required"));
        }
        Ok(())
    }
}
