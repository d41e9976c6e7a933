//! Vehicle-related records: cars, their service entries, and tickets.
//!
//! These are schema-owned records with no behavior of their own; the
//! account workflow only ever reads a user's car for the session DTO.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A car assigned to an employee (at most one per user).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: Uuid,
    pub owner_id: Uuid,
    #[schema(example = "B-123-XYZ")]
    pub registration_number: Option<String>,
    #[schema(example = "Dacia Logan")]
    pub model: Option<String>,
}

/// A scheduled or completed service entry for a car.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarService {
    pub id: Uuid,
    pub car_id: Uuid,
    pub description: Option<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
}

/// A support ticket raised by an employee.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}
