use async_trait::async_trait;

use super::users_model::{NewUser, User};
use crate::errors::Result;

/// Storage contract for users.
pub trait UserRepositoryTrait: Send + Sync {
    /// Inserts a user, enforcing unique username and email.
    fn create(&self, user: User) -> Result<User>;

    fn get_by_id(&self, user_id: &str) -> Result<User>;

    fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    fn list(&self) -> Result<Vec<User>>;
}

/// Service contract for user registration and lookup.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    fn get_user(&self, user_id: &str) -> Result<User>;

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Maps a username alias (the demo user) to its id; other values pass through.
    fn resolve_user_id(&self, identifier: &str) -> String;
}
