use common::Fields;
use common::document::ID_FIELD;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Plain acknowledgment returned by update, delete and health endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Sprite updated")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response for endpoints that create records.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    #[schema(example = "Sprites uploaded")]
    pub message: String,
    /// Identifiers of the new records, in submission order.
    #[schema(example = json!(["0192f3a4-5b6c-7d8e-9f01-23456789abcd"]))]
    pub ids: Vec<String>,
}

/// Partial update payload: field names mapped to the values to set.
///
/// Named fields are overwritten or added; all other fields are left untouched.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct UpdateFields(pub Fields);

/// Checks shared by every partial update.
pub fn validate_update_fields(fields: &Fields) -> Result<(), AppError> {
    if fields.is_empty() {
        return Err(AppError::Validation(
            "Update must name at least one field".into(),
        ));
    }
    if fields.contains_key(ID_FIELD) {
        return Err(AppError::Validation(format!(
            "Field '{ID_FIELD}' cannot be updated"
        )));
    }
    Ok(())
}

/// Convert a typed record into a store field map.
pub fn to_fields<T: Serialize>(record: &T) -> Result<Fields, AppError> {
    match serde_json::to_value(record) {
        Ok(serde_json::Value::Object(map)) => Ok(map),
        Ok(_) => Err(AppError::Internal("record did not serialize to an object".into())),
        Err(e) => Err(AppError::Internal(e.to_string())),
    }
}
