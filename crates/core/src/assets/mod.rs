//! Assets module - the tradable instrument catalog and its simulated price walk.

mod assets_model;
mod assets_repository;
mod assets_service;
mod assets_traits;
mod price_simulator;

pub use assets_model::{AvailableAsset, NewAvailableAsset};
pub use assets_repository::AssetRepository;
pub use assets_service::AssetService;
pub use assets_traits::{AssetRepositoryTrait, AssetServiceTrait};
pub use price_simulator::{PriceSimulator, MAX_PRICE_CHANGE, MIN_PRICE};
