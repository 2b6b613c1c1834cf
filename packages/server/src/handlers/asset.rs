//! Collection-independent asset operations.
//!
//! The sprite and audio handlers are thin wrappers that pick an
//! [`AssetKind`] and delegate here.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::StatusCode;
use common::{Document, DocumentId, Fields};
use tracing::{debug, info};

use crate::config::UploadConfig;
use crate::error::AppError;
use crate::models::asset::{AssetKind, AssetRecord};
use crate::models::shared::{CreatedResponse, MessageResponse, to_fields, validate_update_fields};
use crate::state::AppState;

/// Multipart part name carrying the uploaded files.
pub const FILES_FIELD: &str = "files";

pub fn upload_body_limit(config: &UploadConfig) -> DefaultBodyLimit {
    DefaultBodyLimit::max(config.max_body_bytes)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::Validation(format!("Multipart error: {}", err.body_text()))
    }
}

/// Read every `files` part fully into memory and encode it.
///
/// Nothing is stored until the whole body has been read.
async fn read_files(mut multipart: Multipart) -> Result<Vec<AssetRecord>, AppError> {
    let mut records = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILES_FIELD) {
            continue; // Ignore unknown fields.
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(multipart_error)?;

        debug!(name = %name, size = bytes.len(), "Read uploaded file");
        records.push(AssetRecord::encode(name, content_type, &bytes));
    }

    Ok(records)
}

/// Store each uploaded file as its own record.
///
/// Inserts are best effort: if one fails, the records already stored are
/// kept and reported back in the error body.
pub async fn upload(
    state: &AppState,
    kind: AssetKind,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let records = read_files(multipart).await?;
    if records.is_empty() {
        return Err(AppError::Validation(format!(
            "At least one file must be uploaded in the '{FILES_FIELD}' field"
        )));
    }

    let mut ids = Vec::with_capacity(records.len());
    for record in &records {
        let fields = to_fields(record)?;
        match state.store.insert_one(kind.collection, fields).await {
            Ok(id) => ids.push(id.to_string()),
            Err(e) => {
                return Err(AppError::PartialUpload {
                    ids,
                    detail: e.to_string(),
                });
            }
        }
    }

    info!(collection = %kind.collection, count = ids.len(), "Assets uploaded");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: kind.uploaded_message.into(),
            ids,
        }),
    ))
}

pub async fn list(state: &AppState, kind: AssetKind) -> Result<Json<Vec<Document>>, AppError> {
    let docs = state.store.list(kind.collection).await?;
    Ok(Json(docs))
}

pub async fn update(
    state: &AppState,
    kind: AssetKind,
    id: &str,
    fields: Fields,
) -> Result<Json<MessageResponse>, AppError> {
    let id: DocumentId = id.parse()?;
    validate_update_fields(&fields)?;

    let matched = state
        .store
        .update_fields(kind.collection, id, fields)
        .await?;
    if !matched {
        debug!(collection = %kind.collection, %id, "Update matched no document");
    }

    Ok(Json(MessageResponse::new(kind.updated_message())))
}

pub async fn delete(
    state: &AppState,
    kind: AssetKind,
    id: &str,
) -> Result<Json<MessageResponse>, AppError> {
    let id: DocumentId = id.parse()?;

    let deleted = state.store.delete(kind.collection, id).await?;
    if deleted {
        info!(collection = %kind.collection, %id, "Asset deleted");
    } else {
        debug!(collection = %kind.collection, %id, "Delete matched no document");
    }

    Ok(Json(MessageResponse::new(kind.deleted_message())))
}
