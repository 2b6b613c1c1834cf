use common::Fields;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

/// One entry in a score submission batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ScoreEntry {
    /// Letters and digits only.
    #[schema(example = "Whiskers42")]
    pub player_name: String,
    #[schema(example = 1200)]
    pub score: i64,
}

/// Stored score as returned by `GET /scores`.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ScoreView {
    #[serde(rename = "_id")]
    #[schema(example = "0192f3a4-5b6c-7d8e-9f01-23456789abcd")]
    pub id: String,
    #[schema(example = "Whiskers42")]
    pub player_name: String,
    #[schema(example = 1200)]
    pub score: i64,
}

pub fn is_valid_player_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(char::is_alphanumeric)
}

/// Reject the whole batch if it is empty or any player name is not alphanumeric.
pub fn validate_batch(entries: &[ScoreEntry]) -> Result<(), AppError> {
    if entries.is_empty() {
        return Err(AppError::Validation(
            "At least one score must be submitted".into(),
        ));
    }
    if let Some((index, entry)) = entries
        .iter()
        .enumerate()
        .find(|(_, e)| !is_valid_player_name(&e.player_name))
    {
        return Err(AppError::Validation(format!(
            "Invalid player_name {:?} at index {index}: only letters and digits are allowed",
            entry.player_name
        )));
    }
    Ok(())
}

const FORBIDDEN_KEY_CHARS: [char; 2] = ['$', '.'];
const FORBIDDEN_VALUE_CHARS: [char; 3] = ['$', '{', '}'];

fn is_unsafe_key(key: &str) -> bool {
    key.contains(FORBIDDEN_KEY_CHARS)
}

fn is_unsafe_value(value: &Value) -> bool {
    match value {
        Value::String(s) => s.contains(FORBIDDEN_VALUE_CHARS),
        Value::Array(items) => items.iter().any(is_unsafe_value),
        Value::Object(map) => map.iter().any(|(k, v)| is_unsafe_key(k) || is_unsafe_value(v)),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Denylist filter against operator injection in score updates.
///
/// Field names may not contain `$` or `.`; string values may not contain
/// `$`, `{` or `}`. Nested objects and arrays are checked the same way.
pub fn sanitize_update(fields: &Fields) -> Result<(), AppError> {
    let unsafe_field = fields
        .iter()
        .any(|(key, value)| is_unsafe_key(key) || is_unsafe_value(value));
    if unsafe_field {
        return Err(AppError::UnsafeUpdate);
    }
    Ok(())
}
