use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use common::Document;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::handlers::asset;
use crate::models::asset::{AUDIO, AssetView};
use crate::models::shared::{CreatedResponse, MessageResponse, UpdateFields};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/upload_audios",
    tag = "Audio",
    operation_id = "uploadAudio",
    summary = "Upload audio files",
    description = "Stores every `files` part of the multipart body as its own record, with the \
        content base64-encoded and the declared content type kept as-is. Returns the new ids \
        in upload order. If the store fails part-way, records already stored are kept and \
        listed in the error body.",
    request_body(content_type = "multipart/form-data", description = "One or more `files` parts"),
    responses(
        (status = 201, description = "Audio uploaded", body = CreatedResponse),
        (status = 400, description = "No files or malformed multipart body (VALIDATION_ERROR)", body = ErrorBody),
        (status = 413, description = "Body exceeds the upload limit (PAYLOAD_TOO_LARGE)", body = ErrorBody),
        (status = 500, description = "Store failed mid-upload (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn upload_audios(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    asset::upload(&state, AUDIO, multipart).await
}

#[utoipa::path(
    get,
    path = "/audios",
    tag = "Audio",
    operation_id = "listAudio",
    summary = "List all audio records",
    description = "Returns every stored audio record in insertion order, including any fields added by updates.",
    responses(
        (status = 200, description = "All audio records", body = [AssetView]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_audios(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    asset::list(&state, AUDIO).await
}

#[utoipa::path(
    put,
    path = "/audios/{id}",
    tag = "Audio",
    operation_id = "updateAudio",
    summary = "Partially update an audio record",
    description = "Overwrites or adds the named fields. Unknown ids are acknowledged without change.",
    params(("id" = String, Path, description = "Record id")),
    request_body = UpdateFields,
    responses(
        (status = 200, description = "Audio updated", body = MessageResponse),
        (status = 400, description = "Invalid id, empty payload or `_id` in payload (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateFields>,
) -> Result<Json<MessageResponse>, AppError> {
    asset::update(&state, AUDIO, &id, payload.0).await
}

#[utoipa::path(
    delete,
    path = "/audios/{id}",
    tag = "Audio",
    operation_id = "deleteAudio",
    summary = "Delete an audio record",
    description = "Removes the record. Unknown ids are acknowledged without change.",
    params(("id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "Audio deleted", body = MessageResponse),
        (status = 400, description = "Invalid id (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_audio(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    asset::delete(&state, AUDIO, &id).await
}
