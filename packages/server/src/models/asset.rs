use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use common::Collection;
use serde::Serialize;

/// A binary asset collection exposed over HTTP.
///
/// Sprites and audio clips share one implementation; only the collection
/// and the wording of acknowledgments differ.
#[derive(Debug, Clone, Copy)]
pub struct AssetKind {
    pub collection: Collection,
    /// Singular noun used in acknowledgments, e.g. "Sprite updated".
    pub noun: &'static str,
    pub uploaded_message: &'static str,
}

impl AssetKind {
    pub fn updated_message(&self) -> String {
        format!("{} updated", self.noun)
    }

    pub fn deleted_message(&self) -> String {
        format!("{} deleted", self.noun)
    }
}

pub const SPRITES: AssetKind = AssetKind {
    collection: Collection::Sprites,
    noun: "Sprite",
    uploaded_message: "Sprites uploaded",
};

pub const AUDIO: AssetKind = AssetKind {
    collection: Collection::Audio,
    noun: "Audio",
    uploaded_message: "Audio uploaded",
};

/// Fields stored for a freshly uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRecord {
    /// Original filename; may be empty.
    pub name: String,
    /// Base64 (standard alphabet, padded) of the uploaded bytes.
    pub content: String,
    /// MIME type declared by the uploader, not checked against the bytes.
    pub content_type: Option<String>,
}

impl AssetRecord {
    pub fn encode(name: String, content_type: Option<String>, bytes: &[u8]) -> Self {
        Self {
            name,
            content: STANDARD.encode(bytes),
            content_type,
        }
    }
}

/// Stored asset as returned by the list endpoints.
///
/// Fields added through partial updates are returned alongside these.
#[derive(Serialize, utoipa::ToSchema)]
pub struct AssetView {
    #[serde(rename = "_id")]
    #[schema(example = "0192f3a4-5b6c-7d8e-9f01-23456789abcd")]
    pub id: String,
    #[schema(example = "cat_idle.png")]
    pub name: String,
    /// Base64-encoded file content.
    #[schema(example = "iVBORw0KGgo=")]
    pub content: String,
    #[schema(example = "image/png")]
    pub content_type: Option<String>,
}
