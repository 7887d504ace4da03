//! FinanceHub Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for FinanceHub: the in-memory
//! ledger, balance transfers, the investment desk, the loan calculators and
//! the deferred underwriting workflow. It has no HTTP or runtime opinions;
//! the server crate wires services together and owns background tasks.

pub mod accounts;
pub mod assets;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod investments;
pub mod ledger;
pub mod loans;
pub mod notifications;
pub mod settings;
pub mod transactions;
pub mod users;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
