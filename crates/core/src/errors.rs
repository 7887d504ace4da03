//! Core error types for FinanceHub.
//!
//! Every fallible core operation returns [`Result`]. The server maps these
//! variants onto HTTP status codes; background workflows convert them into
//! notifications instead of propagating.

use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the FinanceHub core.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Insufficient funds in account {account_id}: required {required}, available {available}")]
    InsufficientFunds {
        account_id: String,
        required: Decimal,
        available: Decimal,
    },

    #[error("Insufficient shares of {symbol}: requested {requested}, held {held}")]
    InsufficientShares {
        symbol: String,
        requested: Decimal,
        held: Decimal,
    },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Calculation failed: {0}")]
    Calculation(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Error::Validation(ValidationError::InvalidInput(message.into()))
    }
}

/// Validation errors for user input and request payloads.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("'{field}' must be positive, got {value}")]
    NotPositive { field: &'static str, value: String },

    #[error("Unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(String),
}

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
