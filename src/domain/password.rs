//! Password value object.
//!
//! Wraps Argon2 hashing and verification, plus the one-time password
//! generator used when accounts are provisioned for someone else.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;

use crate::config::{MIN_PASSWORD_LENGTH, ONE_TIME_PASSWORD_LENGTH};
use crate::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Hash a plain-text password.
    ///
    /// # Errors
    /// Returns a validation error when the password is shorter than the
    /// minimum length.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.len() < MIN_PASSWORD_LENGTH {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;

        Ok(Self {
            hash: hash.to_string(),
        })
    }

    /// Wrap an existing hash loaded from storage.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Generate a one-time password for a provisioned account.
    ///
    /// Eight characters taken from a fresh random UUID; unique, not
    /// user-chosen, and expected to be replaced after first login.
    pub fn generate_one_time() -> String {
        let id = Uuid::new_v4().simple().to_string();
        id[..ONE_TIME_PASSWORD_LENGTH].to_string()
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain-text password against this hash.
    pub fn verify(&self, plain_text: &str) -> bool {
        PasswordHash::new(&self.hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(plain_text.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let plain = "SecurePassword123!";
        let password = Password::new(plain).unwrap();

        assert!(password.verify(plain));
        assert!(!password.verify("WrongPassword123"));
    }

    #[test]
    fn restored_hash_still_verifies() {
        let plain = "TestPassword123";
        let password = Password::new(plain).unwrap();
        let hash = password.as_str().to_string();

        let restored = Password::from_hash(hash);
        assert!(restored.verify(plain));
    }

    #[test]
    fn same_password_different_salts() {
        let plain = "SamePassword123";
        let first = Password::new(plain).unwrap();
        let second = Password::new(plain).unwrap();

        assert_ne!(first.as_str(), second.as_str());
        assert!(first.verify(plain));
        assert!(second.verify(plain));
    }

    #[test]
    fn too_short_is_rejected() {
        assert!(Password::new("short").is_err());
        assert!(Password::new("12345678").is_ok());
    }

    #[test]
    fn one_time_password_meets_policy() {
        let otp = Password::generate_one_time();
        assert_eq!(otp.len(), 8);
        // A generated password must verify against its own hash right away.
        let stored = Password::new(&otp).unwrap();
        assert!(stored.verify(&otp));
    }

    #[test]
    fn one_time_passwords_are_unique() {
        let a = Password::generate_one_time();
        let b = Password::generate_one_time();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_never_verifies() {
        let stored = Password::from_hash("not-a-phc-string".to_string());
        assert!(!stored.verify("anything"));
    }
}
