//! Notifications module - in-app messages emitted by ledger and loan workflows.

mod notifications_model;
mod notifications_repository;
mod notifications_service;
mod notifications_traits;

pub use notifications_model::{Notification, NotificationKind};
pub use notifications_repository::NotificationRepository;
pub use notifications_service::NotificationService;
pub use notifications_traits::{NotificationRepositoryTrait, NotificationServiceTrait};
