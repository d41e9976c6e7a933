//! User service - account lookups for the session endpoints.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::User;
use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Application user lookups.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Find a user by username (the email), with the car association
    /// loaded.
    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>>;
}

/// Concrete implementation of [`UserService`].
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.uow.users().find_by_username(username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;
    use uuid::Uuid;

    use crate::infra::{MockUserRepository, UserRepository};

    struct TestUow {
        user_repo: Arc<MockUserRepository>,
    }

    impl UnitOfWork for TestUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.user_repo.clone()
        }
    }

    #[tokio::test]
    async fn get_by_username_passes_through() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .with(eq("dan@example.com"))
            .returning(|username| {
                Ok(Some(User {
                    id: Uuid::new_v4(),
                    email: username.to_string(),
                    password_hash: "hashed".to_string(),
                    first_name: None,
                    last_name: None,
                    cnp: None,
                    address: None,
                    phone_number: None,
                    photo_url: None,
                    car: None,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                }))
            });

        let service = UserManager::new(Arc::new(TestUow {
            user_repo: Arc::new(repo),
        }));
        let user = service.get_by_username("dan@example.com").await.unwrap();
        assert_eq!(user.unwrap().email, "dan@example.com");
    }
}
