//! Simulated market prices.
//!
//! Each cycle moves every price by a uniform relative change within
//! [`MAX_PRICE_CHANGE`] in either direction, rounded to cents and floored at
//! [`MIN_PRICE`].

use std::collections::HashMap;
use std::sync::Mutex;

use log::error;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::assets_model::AvailableAsset;
use crate::errors::{Error, Result};
use crate::utils::round_currency;

/// Largest relative move per cycle (2%).
pub const MAX_PRICE_CHANGE: Decimal = dec!(0.02);

/// Prices never fall below one cent.
pub const MIN_PRICE: Decimal = dec!(0.01);

/// [`MAX_PRICE_CHANGE`] expressed in millionths, the resolution of each draw.
const MAX_CHANGE_MILLIONTHS: i64 = 20_000;
const CHANGE_SCALE: u32 = 6;

/// Random walk generator with an injectable seed.
pub struct PriceSimulator {
    rng: Mutex<StdRng>,
}

impl PriceSimulator {
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Draws the next price for `current`.
    pub fn next_price(&self, current: Decimal) -> Result<Decimal> {
        let drawn = {
            let mut rng = self.rng.lock().map_err(|e| {
                error!("Price simulator lock poisoned: {}", e);
                Error::Unexpected("Price simulator is unavailable".to_string())
            })?;
            rng.gen_range(-MAX_CHANGE_MILLIONTHS..=MAX_CHANGE_MILLIONTHS)
        };
        let change = Decimal::new(drawn, CHANGE_SCALE);
        let next = current
            .checked_mul(Decimal::ONE + change)
            .ok_or_else(|| Error::Calculation(format!("Price overflow for {}", current)))?;
        Ok(round_currency(next).max(MIN_PRICE))
    }

    /// Draws one new price per asset, keyed by symbol.
    pub fn simulate(&self, assets: &[AvailableAsset]) -> Result<HashMap<String, Decimal>> {
        assets
            .iter()
            .map(|asset| Ok((asset.symbol.clone(), self.next_price(asset.current_price)?)))
            .collect()
    }
}
