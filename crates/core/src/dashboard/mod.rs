//! Dashboard module - the per-user financial summary.

mod dashboard_model;
mod dashboard_service;

pub use dashboard_model::DashboardSummary;
pub use dashboard_service::{DashboardService, DashboardServiceTrait};
