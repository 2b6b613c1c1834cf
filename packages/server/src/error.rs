use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::{InvalidDocumentId, StoreError};
use serde::Serialize;

/// Message returned when a score update trips the sanitization filter.
pub const UNSAFE_UPDATE_MESSAGE: &str = "Invalid or unsafe data";

/// Structured error response returned by all endpoints on failure.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `UNSAFE_UPDATE`,
    /// `PAYLOAD_TOO_LARGE`, `UPLOAD_FAILED`, `DATABASE_UNAVAILABLE`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "player_name must be alphanumeric")]
    pub message: String,
    /// Identifiers of records stored before an upload failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation(String),
    /// A score update carried characters the sanitization filter rejects.
    UnsafeUpdate,
    PayloadTooLarge(String),
    /// The store failed part-way through an upload. `ids` were already stored.
    PartialUpload {
        ids: Vec<String>,
        detail: String,
    },
    DatabaseUnavailable(String),
    Internal(String),
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message: msg,
                    ids: None,
                },
            ),
            AppError::UnsafeUpdate => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "UNSAFE_UPDATE",
                    message: UNSAFE_UPDATE_MESSAGE.into(),
                    ids: None,
                },
            ),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ErrorBody {
                    code: "PAYLOAD_TOO_LARGE",
                    message: msg,
                    ids: None,
                },
            ),
            AppError::PartialUpload { ids, detail } => {
                tracing::error!(stored = ids.len(), "Upload failed: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "UPLOAD_FAILED",
                        message: format!(
                            "Upload failed after storing {} file(s)",
                            ids.len()
                        ),
                        ids: Some(ids),
                    },
                )
            }
            AppError::DatabaseUnavailable(detail) => {
                tracing::warn!("Database unreachable: {}", detail);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorBody {
                        code: "DATABASE_UNAVAILABLE",
                        message: "Database is unreachable".into(),
                        ids: None,
                    },
                )
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                        ids: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<InvalidDocumentId> for AppError {
    fn from(err: InvalidDocumentId) -> Self {
        AppError::Validation(format!("Invalid id: {}", err.0))
    }
}
