//! Session token issuance and verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::domain::{Role, User};
use crate::errors::AppResult;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    /// Principal name; the account email
    pub name: String,
    pub roles: Vec<String>,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and verifies signed session tokens.
///
/// A fresh token is minted on every login and currentUser call; tokens
/// are never stored server-side.
pub trait TokenService: Send + Sync {
    /// Sign a token carrying the user's identity claims.
    fn generate(&self, user: &User, roles: &[Role]) -> AppResult<String>;

    /// Verify a token and extract its claims.
    fn verify(&self, token: &str) -> AppResult<Claims>;
}

/// HS256 JWT implementation of [`TokenService`].
pub struct JwtTokenService {
    config: Config,
}

impl JwtTokenService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl TokenService for JwtTokenService {
    fn generate(&self, user: &User, roles: &[Role]) -> AppResult<String> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.config.jwt_expiration_hours);

        let claims = Claims {
            sub: user.id,
            name: user.email.clone(),
            roles: roles.iter().map(Role::to_string).collect(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?;

        Ok(token)
    }

    fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}
