//! Investments module - positions, the trading desk, price revaluation and
//! growth simulation.

mod investments_model;
mod investments_repository;
mod investments_service;
mod investments_traits;
mod price_update_service;
mod simulation;

pub use investments_model::{Investment, PriceUpdateSummary, TradeRequest, TradeResult};
pub use investments_repository::InvestmentRepository;
pub use investments_service::InvestmentService;
pub use investments_traits::{
    InvestmentRepositoryTrait, InvestmentServiceTrait, PriceUpdateServiceTrait,
};
pub use price_update_service::PriceUpdateService;
pub use simulation::{
    simulate_growth, ProjectedReturn, RiskLevel, RiskMetrics, SimulationRequest, SimulationResult,
};
