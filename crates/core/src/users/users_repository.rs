use std::sync::Arc;

use super::users_model::User;
use super::users_traits::UserRepositoryTrait;
use crate::errors::{Error, Result};
use crate::ledger::LedgerStore;

/// In-memory user repository.
pub struct UserRepository {
    store: Arc<LedgerStore>,
}

impl UserRepository {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }
}

impl UserRepositoryTrait for UserRepository {
    fn create(&self, user: User) -> Result<User> {
        self.store.execute(move |ledger| {
            if ledger.users.values().any(|u| u.username == user.username) {
                return Err(Error::ConstraintViolation(
                    "Username already exists".to_string(),
                ));
            }
            if ledger
                .users
                .values()
                .any(|u| u.email.eq_ignore_ascii_case(&user.email))
            {
                return Err(Error::ConstraintViolation("Email already exists".to_string()));
            }
            ledger.users.insert(user)
        })
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        self.store
            .read(|ledger| ledger.users.require(user_id).cloned())?
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.store.read(|ledger| {
            ledger
                .users
                .values()
                .find(|u| u.username == username)
                .cloned()
        })
    }

    fn list(&self) -> Result<Vec<User>> {
        self.store.read(|ledger| ledger.users.values().cloned().collect())
    }
}
