//! Infrastructure layer - External systems integration
//!
//! Database connections, SeaORM entities, repositories, and the
//! unit-of-work access point for the service layer.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};
pub use unit_of_work::{Persistence, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
