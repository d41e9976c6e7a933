//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::api::handlers::account_handler::LoginRequest;
use crate::domain::{Car, LoggedUser, RegisterRequest};
use crate::types::{FailedImport, ImportReport};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::account_handler::login,
        crate::api::handlers::account_handler::register,
        crate::api::handlers::account_handler::current_user,
        crate::api::handlers::upload_handler::upload_user_list,
    ),
    components(
        schemas(
            LoginRequest,
            RegisterRequest,
            LoggedUser,
            Car,
            ImportReport,
            FailedImport,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Account", description = "Login, registration and session endpoints"),
        (name = "Upload", description = "Bulk user import"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
