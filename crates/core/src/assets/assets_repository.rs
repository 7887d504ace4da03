use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::assets_model::{AvailableAsset, NewAvailableAsset};
use super::assets_traits::AssetRepositoryTrait;
use crate::errors::{Error, Result};
use crate::ledger::{Ledger, LedgerStore};
use crate::utils::{new_id, now_naive};

/// In-memory asset catalog.
pub struct AssetRepository {
    store: Arc<LedgerStore>,
}

impl AssetRepository {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }
}

impl AssetRepositoryTrait for AssetRepository {
    fn create(&self, new_asset: NewAvailableAsset) -> Result<AvailableAsset> {
        new_asset.validate()?;
        let symbol = new_asset.symbol.trim().to_uppercase();
        self.store.execute(move |ledger| {
            if ledger.assets.values().any(|a| a.symbol == symbol) {
                return Err(Error::ConstraintViolation(format!(
                    "Asset symbol already exists: {}",
                    symbol
                )));
            }
            let now = now_naive();
            ledger.assets.insert(AvailableAsset {
                id: new_id(),
                symbol,
                name: new_asset.name.trim().to_string(),
                current_price: new_asset.current_price,
                asset_type: new_asset.asset_type,
                market: new_asset.market,
                currency: new_asset.currency,
                created_at: now,
                updated_at: now,
            })
        })
    }

    fn get_by_id(&self, asset_id: &str) -> Result<AvailableAsset> {
        self.store
            .read(|ledger| ledger.assets.require(asset_id).cloned())?
    }

    fn find_by_symbol(&self, symbol: &str) -> Result<Option<AvailableAsset>> {
        let symbol = symbol.trim().to_uppercase();
        self.store.read(|ledger| {
            ledger
                .assets
                .values()
                .find(|a| a.symbol == symbol)
                .cloned()
        })
    }

    fn find_by_type(&self, asset_type: &str) -> Result<Vec<AvailableAsset>> {
        self.store
            .read(|ledger| ledger.assets.filter(|a| a.asset_type == asset_type))
    }

    fn list(&self) -> Result<Vec<AvailableAsset>> {
        self.store
            .read(|ledger| ledger.assets.values().cloned().collect())
    }

    fn update_prices_in_transaction(
        &self,
        ledger: &mut Ledger,
        prices: &HashMap<String, Decimal>,
        at: NaiveDateTime,
    ) -> Result<usize> {
        Ok(ledger.assets.update_where(
            |asset| prices.contains_key(&asset.symbol),
            |asset| {
                if let Some(price) = prices.get(&asset.symbol) {
                    asset.current_price = *price;
                    asset.updated_at = at;
                }
            },
        ))
    }
}
