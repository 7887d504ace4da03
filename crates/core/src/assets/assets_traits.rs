use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use super::assets_model::{AvailableAsset, NewAvailableAsset};
use crate::errors::Result;
use crate::ledger::Ledger;

/// Trait defining the contract for asset catalog storage.
pub trait AssetRepositoryTrait: Send + Sync {
    fn create(&self, new_asset: NewAvailableAsset) -> Result<AvailableAsset>;

    fn get_by_id(&self, asset_id: &str) -> Result<AvailableAsset>;

    fn find_by_symbol(&self, symbol: &str) -> Result<Option<AvailableAsset>>;

    fn find_by_type(&self, asset_type: &str) -> Result<Vec<AvailableAsset>>;

    fn list(&self) -> Result<Vec<AvailableAsset>>;

    /// Writes new prices keyed by symbol; unknown symbols are ignored.
    /// Returns how many catalog entries changed.
    fn update_prices_in_transaction(
        &self,
        ledger: &mut Ledger,
        prices: &HashMap<String, Decimal>,
        at: NaiveDateTime,
    ) -> Result<usize>;
}

/// Trait defining the contract for asset catalog operations.
#[async_trait]
pub trait AssetServiceTrait: Send + Sync {
    /// Adds an instrument; the symbol is upper-cased and must be unique.
    async fn create_asset(&self, new_asset: NewAvailableAsset) -> Result<AvailableAsset>;

    fn get_assets(&self) -> Result<Vec<AvailableAsset>>;

    /// Looks up an instrument by symbol, failing with NotFound.
    fn get_asset_by_symbol(&self, symbol: &str) -> Result<AvailableAsset>;
}
