//! Bulk user import from an uploaded spreadsheet.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    response::Json,
    routing::post,
    Router,
};

use crate::api::AppState;
use crate::config::MAX_UPLOAD_BYTES;
use crate::errors::{AppError, AppResult};
use crate::types::ImportReport;

/// Upload routes
pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/userList", post(upload_user_list))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// Import users from an uploaded `.xlsx` file
///
/// Rows are registered strictly in order; a rejected row is reported
/// with its reason and does not block the rows after it.
#[utoipa::path(
    post,
    path = "/upload/userList",
    tag = "Upload",
    responses(
        (status = 200, description = "Per-row import outcome", body = ImportReport),
        (status = 400, description = "Missing file or unreadable spreadsheet")
    )
)]
pub async fn upload_user_list(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<ImportReport>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        // Accept the first file-carrying field regardless of its name.
        if field.file_name().is_none() && field.name() != Some("file") {
            continue;
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("Failed to read upload: {}", e)))?;

        tracing::info!(size = bytes.len(), "Received user list upload");

        let rows = state.importer.parse(&bytes)?;
        let report = state.imports.register_all(rows).await;
        return Ok(Json(report));
    }

    Err(AppError::bad_request("No file field in upload"))
}
