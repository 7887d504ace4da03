use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;

use super::investments_model::PriceUpdateSummary;
use super::investments_traits::{InvestmentRepositoryTrait, PriceUpdateServiceTrait};
use crate::assets::{AssetRepositoryTrait, PriceSimulator};
use crate::errors::Result;
use crate::ledger::LedgerStore;
use crate::utils::now_naive;

/// Revalues the catalog and all positions from a price batch.
pub struct PriceUpdateService {
    store: Arc<LedgerStore>,
    asset_repository: Arc<dyn AssetRepositoryTrait>,
    investment_repository: Arc<dyn InvestmentRepositoryTrait>,
    simulator: PriceSimulator,
}

impl PriceUpdateService {
    pub fn new(
        store: Arc<LedgerStore>,
        asset_repository: Arc<dyn AssetRepositoryTrait>,
        investment_repository: Arc<dyn InvestmentRepositoryTrait>,
        simulator: PriceSimulator,
    ) -> Self {
        Self {
            store,
            asset_repository,
            investment_repository,
            simulator,
        }
    }
}

impl PriceUpdateServiceTrait for PriceUpdateService {
    fn apply_prices(&self, prices: &HashMap<String, Decimal>) -> Result<PriceUpdateSummary> {
        let now = now_naive();
        let summary = self.store.execute(|ledger| {
            Ok(PriceUpdateSummary {
                assets_updated: self
                    .asset_repository
                    .update_prices_in_transaction(ledger, prices, now)?,
                positions_updated: self
                    .investment_repository
                    .update_prices_in_transaction(ledger, prices, now)?,
            })
        })?;
        debug!(
            "Applied prices to {} assets and {} positions",
            summary.assets_updated, summary.positions_updated
        );
        Ok(summary)
    }

    fn run_cycle(&self) -> Result<PriceUpdateSummary> {
        let assets = self.asset_repository.list()?;
        let prices = self.simulator.simulate(&assets)?;
        self.apply_prices(&prices)
    }
}
