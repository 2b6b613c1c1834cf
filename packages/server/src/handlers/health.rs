use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::models::shared::MessageResponse;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Health",
    operation_id = "healthCheck",
    summary = "Service liveness",
    description = "Always succeeds while the process is serving requests, regardless of database state.",
    responses(
        (status = 200, description = "Service running", body = MessageResponse),
    ),
)]
pub async fn health() -> Json<MessageResponse> {
    Json(MessageResponse::new("service running"))
}

#[utoipa::path(
    get,
    path = "/ping",
    tag = "Health",
    operation_id = "pingDatabase",
    summary = "Database connectivity check",
    description = "Round-trips to the document store.",
    responses(
        (status = 200, description = "Database reachable", body = MessageResponse),
        (status = 503, description = "Database unreachable (DATABASE_UNAVAILABLE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn ping(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    state
        .store
        .ping()
        .await
        .map_err(|e| AppError::DatabaseUnavailable(e.to_string()))?;
    Ok(Json(MessageResponse::new("Connected")))
}
