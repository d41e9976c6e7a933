//! Account handlers: login, registration, current session.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{LoggedUser, RegisterRequest};
use crate::errors::{AppError, AppResult};
use crate::services::Mail;

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Account email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "jane.doe@example.com")]
    pub email: String,
    /// Account password
    #[schema(example = "ab12cd34")]
    pub password: String,
}

/// Public account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

/// Routes requiring an authenticated session
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/currentUser", get(current_user))
}

/// Log in and receive a session projection with a fresh token
#[utoipa::path(
    post,
    path = "/api/account/login",
    tag = "Account",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoggedUser),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<LoggedUser>> {
    let user = state
        .identity
        .authenticate(&payload.email, &payload.password)
        .await?;

    let roles = state.identity.roles_of(user.id).await?;
    let token = state.tokens.generate(&user, &roles)?;

    Ok(Json(LoggedUser::project(user, token)))
}

/// Register a new account with a generated one-time password
#[utoipa::path(
    post,
    path = "/api/account/register",
    tag = "Account",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created"),
        (status = 400, description = "Creation rejected; one entry per error code")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<StatusCode> {
    let created = state.identity.create_user(&payload).await?;
    state
        .identity
        .assign_role(created.user.id, created.role)
        .await?;

    // Delivery failure is logged; the account already exists.
    let mail = Mail::credentials(&created.user.email, &created.one_time_password);
    if let Err(e) = state.mailer.send(mail).await {
        tracing::warn!(email = %created.user.email, "Credential email failed: {}", e);
    }

    tracing::info!(email = %created.user.email, "New account created");
    Ok(StatusCode::CREATED)
}

/// Current session's user, with car and a freshly minted token
#[utoipa::path(
    get,
    path = "/api/account/currentUser",
    tag = "Account",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current session projection", body = LoggedUser),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn current_user(
    Extension(principal): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<LoggedUser>> {
    // A valid token for an account that no longer resolves is broken
    // state, not a client error.
    let user = state
        .users
        .get_by_username(&principal.name)
        .await?
        .ok_or_else(|| {
            AppError::internal(format!(
                "Authenticated principal '{}' has no user record",
                principal.name
            ))
        })?;

    let roles = state.identity.roles_of(user.id).await?;
    let token = state.tokens.generate(&user, &roles)?;

    Ok(Json(LoggedUser::project(user, token)))
}
