//! Transactions module - ledger rows, the balance transfer primitive and
//! monthly aggregates.

mod transactions_model;
mod transactions_repository;
mod transactions_service;
mod transactions_service_tests;
mod transactions_traits;

pub use transactions_model::{NewTransaction, Transaction, Transfer};
pub use transactions_repository::TransactionRepository;
pub use transactions_service::TransactionService;
pub use transactions_traits::{TransactionRepositoryTrait, TransactionServiceTrait};
