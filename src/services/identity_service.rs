//! Identity layer: credential verification and account creation.
//!
//! Owns everything touching stored credentials. Account creation
//! reports every problem it finds as a (code, description) pair so the
//! caller can surface the full list at once.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;
use validator::ValidateEmail;

use crate::domain::{NewUser, Password, RegisterRequest, Role, User};
use crate::errors::{AppError, AppResult, IdentityIssue};
use crate::infra::UnitOfWork;

/// Placeholder hash verified when the email is unknown, so both failure
/// paths cost a password verification.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

/// Result of a successful account creation.
#[derive(Debug, Clone)]
pub struct CreatedUser {
    pub user: User,
    /// The requested role, parsed during validation
    pub role: Role,
    /// Generated password, to be delivered to the account holder
    pub one_time_password: String,
}

/// Credential store operations: lookup, verification, creation, role
/// assignment.
#[async_trait]
pub trait IdentityService: Send + Sync {
    /// Verify credentials and return the account.
    ///
    /// Unknown email and wrong password both produce
    /// [`AppError::InvalidCredentials`]; the response never says which.
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User>;

    /// Validate the registration and create the account with a generated
    /// one-time password.
    ///
    /// # Errors
    /// [`AppError::Registration`] carrying one issue per error code.
    async fn create_user(&self, registration: &RegisterRequest) -> AppResult<CreatedUser>;

    /// Add the user to a role.
    async fn assign_role(&self, user_id: Uuid, role: Role) -> AppResult<()>;

    /// Roles currently held by the user.
    async fn roles_of(&self, user_id: Uuid) -> AppResult<Vec<Role>>;
}

/// Concrete implementation over the persistence layer.
pub struct IdentityManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> IdentityManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> IdentityService for IdentityManager<U> {
    async fn authenticate(&self, email: &str, password: &str) -> AppResult<User> {
        let found = self.uow.users().find_by_email(email).await?;

        // Verify against a placeholder hash when the user is missing so
        // the two rejection paths are not distinguishable by timing.
        let (hash, user_exists) = match &found {
            Some(user) => (user.password_hash.as_str(), true),
            None => (DUMMY_HASH, false),
        };

        let password_valid = Password::from_hash(hash.to_string()).verify(password);

        if !user_exists || !password_valid {
            if user_exists {
                tracing::info!(email = %email, "Failed login: wrong password");
            }
            return Err(AppError::InvalidCredentials);
        }

        // user_exists was checked above
        Ok(found.unwrap())
    }

    async fn create_user(&self, registration: &RegisterRequest) -> AppResult<CreatedUser> {
        let mut issues = Vec::new();

        if !registration.email.validate_email() {
            issues.push(IdentityIssue::new(
                "InvalidEmail",
                format!("Email '{}' is invalid.", registration.email),
            ));
        }

        let role = Role::parse(&registration.role);
        if role.is_none() {
            issues.push(IdentityIssue::new(
                "InvalidRole",
                format!("Role '{}' does not exist.", registration.role),
            ));
        }

        if self
            .uow
            .users()
            .find_by_email(&registration.email)
            .await?
            .is_some()
        {
            issues.push(IdentityIssue::new(
                "DuplicateEmail",
                format!("Email '{}' is already taken.", registration.email),
            ));
        }

        if !issues.is_empty() {
            return Err(AppError::registration(issues));
        }

        let one_time_password = Password::generate_one_time();
        let password_hash = Password::new(&one_time_password)?.into_string();

        let user = self
            .uow
            .users()
            .create(NewUser {
                email: registration.email.clone(),
                password_hash,
                first_name: registration.first_name.clone(),
                last_name: registration.last_name.clone(),
                cnp: registration.cnp.clone(),
                address: registration.address.clone(),
                phone_number: registration.phone_number.clone(),
                photo_url: registration.photo_url.clone(),
            })
            .await?;

        Ok(CreatedUser {
            user,
            // role parse failure was reported above
            role: role.unwrap(),
            one_time_password,
        })
    }

    async fn assign_role(&self, user_id: Uuid, role: Role) -> AppResult<()> {
        self.uow.users().assign_role(user_id, role).await
    }

    async fn roles_of(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        self.uow.users().roles_of(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::predicate::eq;

    use crate::infra::{MockUserRepository, UserRepository};

    struct TestUow {
        user_repo: Arc<MockUserRepository>,
    }

    impl TestUow {
        fn new(user_repo: MockUserRepository) -> Arc<Self> {
            Arc::new(Self {
                user_repo: Arc::new(user_repo),
            })
        }
    }

    impl UnitOfWork for TestUow {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.user_repo.clone()
        }
    }

    fn stored_user(email: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            cnp: None,
            address: None,
            phone_number: None,
            photo_url: None,
            car: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn registration(email: &str, role: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
            cnp: Some("1850505123456".to_string()),
            address: None,
            phone_number: None,
            photo_url: None,
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn authenticate_success_returns_user() {
        let user = stored_user("ana@example.com", "correct-horse");
        let expected_id = user.id;

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("ana@example.com"))
            .returning(move |_| Ok(Some(user.clone())));

        let service = IdentityManager::new(TestUow::new(repo));
        let result = service
            .authenticate("ana@example.com", "correct-horse")
            .await
            .unwrap();
        assert_eq!(result.id, expected_id);
    }

    #[tokio::test]
    async fn authenticate_rejects_unknown_email_and_wrong_password_alike() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(None));
        let service = IdentityManager::new(TestUow::new(repo));
        let unknown = service.authenticate("ghost@example.com", "whatever").await;
        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));

        let user = stored_user("ana@example.com", "correct-horse");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));
        let service = IdentityManager::new(TestUow::new(repo));
        let wrong = service.authenticate("ana@example.com", "battery-staple").await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn create_user_reports_duplicate_email() {
        let existing = stored_user("taken@example.com", "password1");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(existing.clone())));

        let service = IdentityManager::new(TestUow::new(repo));
        let result = service
            .create_user(&registration("taken@example.com", "Employee"))
            .await;

        match result {
            Err(AppError::Registration(issues)) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].code, "DuplicateEmail");
            }
            other => panic!("expected registration failure, got {:?}", other.map(|c| c.user.email)),
        }
    }

    #[tokio::test]
    async fn create_user_aggregates_every_issue() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let service = IdentityManager::new(TestUow::new(repo));
        let result = service
            .create_user(&registration("not-an-email", "Manager"))
            .await;

        match result {
            Err(AppError::Registration(issues)) => {
                let codes: Vec<&str> = issues.iter().map(|i| i.code.as_str()).collect();
                assert_eq!(codes, vec!["InvalidEmail", "InvalidRole"]);
            }
            other => panic!("expected registration failure, got {:?}", other.map(|c| c.user.email)),
        }
    }

    #[tokio::test]
    async fn create_user_generates_verifiable_one_time_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().returning(|new_user| {
            Ok(User {
                id: Uuid::new_v4(),
                email: new_user.email,
                password_hash: new_user.password_hash,
                first_name: new_user.first_name,
                last_name: new_user.last_name,
                cnp: new_user.cnp,
                address: new_user.address,
                phone_number: new_user.phone_number,
                photo_url: new_user.photo_url,
                car: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

        let service = IdentityManager::new(TestUow::new(repo));
        let created = service
            .create_user(&registration("new.hire@example.com", "Employee"))
            .await
            .unwrap();

        assert_eq!(created.role, Role::Employee);
        assert_eq!(created.one_time_password.len(), 8);
        // The fresh credential must verify immediately after creation.
        let stored = Password::from_hash(created.user.password_hash.clone());
        assert!(stored.verify(&created.one_time_password));
    }
}
