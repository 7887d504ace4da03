use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::constants::DEMO_USERNAME;
use crate::errors::Result;
use crate::utils::{new_id, now_naive};

/// Service for registering and looking up users.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        let now = now_naive();
        let user = User {
            id: new_id(),
            username: new_user.username.trim().to_string(),
            password: new_user.password,
            name: new_user.name,
            email: new_user.email.trim().to_string(),
            created_at: now,
            updated_at: now,
        };
        let created = self.repository.create(user)?;
        info!("Registered user {} ({})", created.username, created.id);
        Ok(created)
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repository.find_by_username(username)
    }

    fn resolve_user_id(&self, identifier: &str) -> String {
        if identifier != DEMO_USERNAME {
            return identifier.to_string();
        }
        match self.repository.find_by_username(identifier) {
            Ok(Some(user)) => user.id,
            _ => {
                debug!("Demo user alias used before seeding; keeping raw identifier");
                identifier.to_string()
            }
        }
    }
}
