#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::constants::DEMO_USERNAME;
    use crate::errors::{Error, ValidationError};
    use crate::ledger::LedgerStore;
    use crate::users::{NewUser, UserRepository, UserService, UserServiceTrait};

    fn service() -> UserService {
        let store = Arc::new(LedgerStore::new());
        UserService::new(Arc::new(UserRepository::new(store)))
    }

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            password: "pw".to_string(),
            name: "Mario Rossi".to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_username() {
        let service = service();
        service
            .create_user(new_user("mario", "mario@example.it"))
            .await
            .unwrap();

        let err = service
            .create_user(new_user("mario", "other@example.it"))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            Error::ConstraintViolation("Username already exists".to_string())
        );
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate_email() {
        let service = service();
        service
            .create_user(new_user("mario", "mario@example.it"))
            .await
            .unwrap();

        let err = service
            .create_user(new_user("luigi", "MARIO@example.it"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn test_create_user_validates_email() {
        let service = service();
        let err = service
            .create_user(new_user("mario", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_user_id_maps_demo_alias() {
        let service = service();
        assert_eq!(service.resolve_user_id(DEMO_USERNAME), DEMO_USERNAME);

        let demo = service
            .create_user(new_user(DEMO_USERNAME, "demo@example.it"))
            .await
            .unwrap();
        assert_eq!(service.resolve_user_id(DEMO_USERNAME), demo.id);
        assert_eq!(service.resolve_user_id("someone-else"), "someone-else");
    }

    #[tokio::test]
    async fn test_get_user_unknown_is_not_found() {
        let service = service();
        let err = service.get_user("nope").unwrap_err();
        assert_eq!(err, Error::not_found("User", "nope"));
    }
}
