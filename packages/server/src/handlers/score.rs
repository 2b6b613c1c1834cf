use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{Collection, Document, DocumentId};
use tracing::{debug, info, instrument, warn};

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::score::{ScoreEntry, ScoreView, sanitize_update, validate_batch};
use crate::models::shared::{
    CreatedResponse, MessageResponse, UpdateFields, to_fields, validate_update_fields,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/upload_scores",
    tag = "Scores",
    operation_id = "submitScores",
    summary = "Submit a batch of scores",
    description = "Inserts every entry in one store round-trip and returns the new ids in \
        submission order. The batch is all-or-nothing with respect to validation: a single \
        non-alphanumeric `player_name` rejects it before anything is stored.",
    request_body = Vec<ScoreEntry>,
    responses(
        (status = 201, description = "Scores submitted", body = CreatedResponse),
        (status = 400, description = "Empty batch, malformed body or invalid player name (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip_all, fields(count = entries.len()))]
pub async fn upload_scores(
    State(state): State<AppState>,
    AppJson(entries): AppJson<Vec<ScoreEntry>>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    if let Err(e) = validate_batch(&entries) {
        warn!("Rejected score batch");
        return Err(e);
    }

    let documents = entries
        .iter()
        .map(to_fields)
        .collect::<Result<Vec<_>, _>>()?;

    let ids = state
        .store
        .insert_many(Collection::Scores, documents)
        .await?
        .into_iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>();

    info!(count = ids.len(), "Scores submitted");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Scores submitted".into(),
            ids,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/scores",
    tag = "Scores",
    operation_id = "listScores",
    summary = "List all scores",
    description = "Returns every stored score in insertion order.",
    responses(
        (status = 200, description = "All scores", body = [ScoreView]),
    ),
)]
#[instrument(skip(state))]
pub async fn list_scores(State(state): State<AppState>) -> Result<Json<Vec<Document>>, AppError> {
    let docs = state.store.list(Collection::Scores).await?;
    Ok(Json(docs))
}

#[utoipa::path(
    put,
    path = "/scores/{id}",
    tag = "Scores",
    operation_id = "updateScore",
    summary = "Partially update a score",
    description = "Overwrites or adds the named fields after the payload passes the \
        sanitization filter: field names may not contain `$` or `.`, and string values may \
        not contain `$`, `{` or `}`. Rejected payloads never reach the store. Unknown ids \
        are acknowledged without change.",
    params(("id" = String, Path, description = "Score id")),
    request_body = UpdateFields,
    responses(
        (status = 200, description = "Score updated", body = MessageResponse),
        (status = 400, description = "Invalid id or payload (VALIDATION_ERROR), or unsafe payload (UNSAFE_UPDATE)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn update_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateFields>,
) -> Result<Json<MessageResponse>, AppError> {
    let id: DocumentId = id.parse()?;
    let fields = payload.0;
    validate_update_fields(&fields)?;
    if let Err(e) = sanitize_update(&fields) {
        warn!(%id, "Rejected unsafe score update");
        return Err(e);
    }

    let matched = state
        .store
        .update_fields(Collection::Scores, id, fields)
        .await?;
    if !matched {
        debug!(%id, "Score update matched no document");
    }

    Ok(Json(MessageResponse::new("Score updated")))
}

#[utoipa::path(
    delete,
    path = "/scores/{id}",
    tag = "Scores",
    operation_id = "deleteScore",
    summary = "Delete a score",
    description = "Removes the score. Unknown ids are acknowledged without change.",
    params(("id" = String, Path, description = "Score id")),
    responses(
        (status = 200, description = "Score deleted", body = MessageResponse),
        (status = 400, description = "Invalid id (VALIDATION_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state))]
pub async fn delete_score(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id: DocumentId = id.parse()?;

    if state.store.delete(Collection::Scores, id).await? {
        info!(%id, "Score deleted");
    } else {
        debug!(%id, "Score delete matched no document");
    }

    Ok(Json(MessageResponse::new("Score deleted")))
}
