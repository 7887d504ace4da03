use std::sync::Arc;

use async_trait::async_trait;
use log::info;

use super::assets_model::{AvailableAsset, NewAvailableAsset};
use super::assets_traits::{AssetRepositoryTrait, AssetServiceTrait};
use crate::errors::{Error, Result};

/// Service for the instrument catalog.
pub struct AssetService {
    repository: Arc<dyn AssetRepositoryTrait>,
}

impl AssetService {
    pub fn new(repository: Arc<dyn AssetRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl AssetServiceTrait for AssetService {
    async fn create_asset(&self, new_asset: NewAvailableAsset) -> Result<AvailableAsset> {
        let asset = self.repository.create(new_asset)?;
        info!("Listed asset {} at {}", asset.symbol, asset.current_price);
        Ok(asset)
    }

    fn get_assets(&self) -> Result<Vec<AvailableAsset>> {
        self.repository.list()
    }

    fn get_asset_by_symbol(&self, symbol: &str) -> Result<AvailableAsset> {
        self.repository
            .find_by_symbol(symbol)?
            .ok_or_else(|| Error::not_found("Asset", symbol))
    }
}
