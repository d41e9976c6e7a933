//! SeaORM entity definitions
//!
//! Database-specific entities, kept separate from domain models.

pub mod car;
pub mod car_service;
pub mod role;
pub mod ticket;
pub mod user;
pub mod user_role;

// Re-exports for public API convenience
#[allow(unused_imports)]
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
