//! Runtime settings the server hands to core services.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_LARGE_TRANSACTION_THRESHOLD, DEFAULT_REFERENCE_PREFIX};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LedgerSettings {
    /// Transfers with an absolute amount at or above this value notify the owner.
    pub large_transaction_threshold: Decimal,
    /// Prefix for generated transaction reference numbers.
    pub reference_prefix: String,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            large_transaction_threshold: Decimal::from_str(DEFAULT_LARGE_TRANSACTION_THRESHOLD)
                .unwrap_or(Decimal::ONE_THOUSAND),
            reference_prefix: DEFAULT_REFERENCE_PREFIX.to_string(),
        }
    }
}
