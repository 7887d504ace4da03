//! Users module - domain models, repository, and service.

mod users_model;
mod users_repository;
mod users_service;
mod users_service_tests;
mod users_traits;

pub use users_model::{NewUser, User};
pub use users_repository::UserRepository;
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
