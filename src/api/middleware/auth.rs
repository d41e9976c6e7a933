//! JWT authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Authenticated principal extracted from the session token.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: Uuid,
    /// Principal name; the account email
    pub name: String,
    pub roles: Vec<String>,
}

/// Validates the Bearer token and injects [`CurrentUser`] into the
/// request extensions. Requests without a valid token get 401.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let claims = state.tokens.verify(token)?;

    let current_user = CurrentUser {
        id: claims.sub,
        name: claims.name,
        roles: claims.roles,
    };

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}
