#[cfg(feature = "sea-orm")]
use sea_orm::prelude::StringLen;

use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Name under which a document's identifier is rendered on the wire.
pub const ID_FIELD: &str = "_id";

/// Field map of a stored document, not including its identifier.
pub type Fields = Map<String, Value>;

/// Store-assigned identifier of a document.
///
/// Identifiers are UUIDv7 values, so sorting by id follows insertion order
/// and an identifier is never handed out twice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(Uuid);

impl DocumentId {
    /// Mint a fresh, time-ordered identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for DocumentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Returned when a string does not parse as a [`DocumentId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid document id: {0:?}")]
pub struct InvalidDocumentId(pub String);

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| InvalidDocumentId(s.to_string()))
    }
}

/// Logical collection a document lives in.
///
/// When the `sea-orm` feature is enabled, this enum can be used directly in SeaORM entities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(
    feature = "sea-orm",
    derive(sea_orm::DeriveActiveEnum, sea_orm::EnumIter),
    sea_orm(rs_type = "String", db_type = "String(StringLen::None)")
)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    /// Uploaded sprite images.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "sprites"))]
    Sprites,
    /// Uploaded audio clips.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "audio"))]
    Audio,
    /// Player scores.
    #[cfg_attr(feature = "sea-orm", sea_orm(string_value = "scores"))]
    Scores,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sprites => "sprites",
            Self::Audio => "audio",
            Self::Scores => "scores",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored record: its identifier plus an open set of fields.
///
/// Serializes as a flat JSON object with the identifier under `_id`.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    pub fn new(id: DocumentId, fields: Fields) -> Self {
        Self { id, fields }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = self.fields.keys().filter(|k| *k != ID_FIELD).count();
        let mut map = serializer.serialize_map(Some(extra + 1))?;
        map.serialize_entry(ID_FIELD, &self.id.to_string())?;
        for (key, value) in self.fields.iter().filter(|(k, _)| *k != ID_FIELD) {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Overwrite (or add) every field named in `update`, leaving the rest alone.
///
/// The identifier field is never written into a document body.
pub fn apply_update(fields: &mut Fields, update: Fields) {
    for (key, value) in update {
        if key == ID_FIELD {
            continue;
        }
        fields.insert(key, value);
    }
}
