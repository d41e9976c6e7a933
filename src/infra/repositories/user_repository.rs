//! User repository - persistence operations behind the identity layer.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use super::entities::{car, role, user, user_role};
use crate::domain::{Car, NewUser, Role, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Persistence operations for user accounts and their role memberships.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email. The car association is not loaded.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Find a user by username (the email), loading the associated car.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Insert a new user row.
    async fn create(&self, user: NewUser) -> AppResult<User>;

    /// Add the user to a seeded role.
    async fn assign_role(&self, user_id: Uuid, role: Role) -> AppResult<()>;

    /// Roles the user currently holds.
    async fn roles_of(&self, user_id: Uuid) -> AppResult<Vec<Role>>;
}

/// SeaORM-backed implementation of [`UserRepository`].
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn car_of(&self, user_id: Uuid) -> AppResult<Option<Car>> {
        let car = car::Entity::find()
            .filter(car::Column::OwnerId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(car.map(Car::from))
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(found.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let found = user::Entity::find()
            .filter(user::Column::Email.eq(username))
            .one(&self.db)
            .await?;

        match found {
            Some(model) => {
                let mut user = User::from(model);
                user.car = self.car_of(user.id).await?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let now = Utc::now();
        let active = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(new_user.email),
            password_hash: Set(new_user.password_hash),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            cnp: Set(new_user.cnp),
            address: Set(new_user.address),
            phone_number: Set(new_user.phone_number),
            photo_url: Set(new_user.photo_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = active.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn assign_role(&self, user_id: Uuid, role: Role) -> AppResult<()> {
        // Roles are seeded by migration; a missing row means broken schema.
        let role_row = role::Entity::find()
            .filter(role::Column::Name.eq(role.as_str()))
            .one(&self.db)
            .await?
            .ok_or_else(|| AppError::internal(format!("Role '{}' is not seeded", role)))?;

        let membership = user_role::ActiveModel {
            user_id: Set(user_id),
            role_id: Set(role_row.id),
        };
        membership.insert(&self.db).await?;
        Ok(())
    }

    async fn roles_of(&self, user_id: Uuid) -> AppResult<Vec<Role>> {
        let links = user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .all(&self.db)
            .await?;

        let role_ids: Vec<Uuid> = links.into_iter().map(|link| link.role_id).collect();
        if role_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = role::Entity::find()
            .filter(role::Column::Id.is_in(role_ids))
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| Role::parse(&row.name))
            .collect())
    }
}
