//! User domain entity, roles, and the API projections built from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::config::{ROLE_ADMIN, ROLE_EMPLOYEE};
use crate::domain::Car;

/// Fixed role set, seeded at schema initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Role {
    Admin,
    Employee,
}

impl Role {
    /// Parse a role name; unknown names are rejected, not defaulted.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case(ROLE_ADMIN) {
            Some(Role::Admin)
        } else if s.eq_ignore_ascii_case(ROLE_EMPLOYEE) {
            Some(Role::Employee)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => ROLE_ADMIN,
            Role::Employee => ROLE_EMPLOYEE,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Employee account entity.
///
/// The email doubles as the account's username; the optional car is
/// populated only by lookups that ask for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cnp: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car: Option<Car>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values for a user row about to be inserted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cnp: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
}

/// Registration input, used for single sign-up and for each imported
/// spreadsheet row.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Account email address; doubles as the username
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    /// National identification number
    #[schema(example = "2960101123456")]
    pub cnp: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    /// Requested role; must name one of the seeded roles
    #[validate(length(min = 1, message = "Role is required"))]
    #[schema(example = "Employee")]
    pub role: String,
}

/// Session projection returned by login and currentUser.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoggedUser {
    pub id: Uuid,
    /// Same as the email; kept as a separate field for client compatibility
    #[schema(example = "jane.doe@example.com")]
    pub user_name: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub cnp: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub car: Option<Car>,
    /// Freshly minted session token
    pub token: String,
}

impl LoggedUser {
    /// The one projection from a user entity plus a minted token.
    ///
    /// cnp mirrors last_name here; existing clients depend on this
    /// projection, so it is kept as-is.
    pub fn project(user: User, token: String) -> Self {
        Self {
            id: user.id,
            user_name: user.email.clone(),
            email: user.email,
            first_name: user.first_name,
            cnp: user.last_name.clone(),
            last_name: user.last_name,
            address: user.address,
            phone_number: user.phone_number,
            photo_url: user.photo_url,
            car: user.car,
            token,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            email: "ion.popescu@example.com".to_string(),
            password_hash: "hashed".to_string(),
            first_name: Some("Ion".to_string()),
            last_name: Some("Popescu".to_string()),
            cnp: Some("1850505123456".to_string()),
            address: Some("Str. Lunga 1".to_string()),
            phone_number: Some("0721000000".to_string()),
            photo_url: None,
            car: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn role_parse_accepts_seeded_names_case_insensitively() {
        assert_eq!(Role::parse("Admin"), Some(Role::Admin));
        assert_eq!(Role::parse("employee"), Some(Role::Employee));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse("manager"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn role_display_round_trips() {
        assert_eq!(Role::Admin.to_string(), "Admin");
        assert_eq!(Role::Employee.to_string(), "Employee");
        assert_eq!(Role::parse(&Role::Admin.to_string()), Some(Role::Admin));
    }

    #[test]
    fn projection_mirrors_last_name_into_cnp() {
        let user = sample_user();
        let dto = LoggedUser::project(user, "tok".to_string());
        assert_eq!(dto.cnp.as_deref(), Some("Popescu"));
        assert_eq!(dto.last_name.as_deref(), Some("Popescu"));
    }

    #[test]
    fn projection_username_matches_email() {
        let user = sample_user();
        let email = user.email.clone();
        let dto = LoggedUser::project(user, "tok".to_string());
        assert_eq!(dto.user_name, email);
        assert_eq!(dto.email, email);
        assert_eq!(dto.token, "tok");
    }

    #[test]
    fn projection_omits_car_unless_loaded() {
        let mut user = sample_user();
        let dto = LoggedUser::project(user.clone(), "t".to_string());
        assert!(dto.car.is_none());

        user.car = Some(Car {
            id: Uuid::new_v4(),
            owner_id: user.id,
            registration_number: Some("B-123-XYZ".to_string()),
            model: Some("Dacia Logan".to_string()),
        });
        let dto = LoggedUser::project(user, "t".to_string());
        assert!(dto.car.is_some());
    }
}
