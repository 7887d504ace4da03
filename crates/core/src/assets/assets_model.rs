//! Asset catalog models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::ledger::Entity;

/// A tradable instrument offered to users.
///
/// Prices change only through the price update cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailableAsset {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub current_price: Decimal,
    pub asset_type: String,
    pub market: String,
    pub currency: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Entity for AvailableAsset {
    const NAME: &'static str = "Asset";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Input model for adding an instrument to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAvailableAsset {
    pub symbol: String,
    pub name: String,
    pub current_price: Decimal,
    pub asset_type: String,
    pub market: String,
    pub currency: String,
}

impl NewAvailableAsset {
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "name".to_string(),
            )));
        }
        if self.current_price <= Decimal::ZERO {
            return Err(Error::Validation(ValidationError::NotPositive {
                field: "currentPrice",
                value: self.current_price.to_string(),
            }));
        }
        Ok(())
    }
}
