//! Repository access point for the service layer.
//!
//! Every request here is a straight-line sequence of independent
//! persistence calls, so there is no cross-repository transaction
//! management; the unit of work only hands out repositories.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::repositories::{UserRepository, UserStore};

/// Central repository access for dependency injection.
pub trait UnitOfWork: Send + Sync {
    /// Get user repository
    fn users(&self) -> Arc<dyn UserRepository>;
}

/// Concrete implementation of [`UnitOfWork`] over a live connection.
pub struct Persistence {
    user_repo: Arc<UserStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db)),
        }
    }
}

impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }
}
