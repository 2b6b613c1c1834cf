use async_trait::async_trait;

use super::error::StoreError;
use crate::document::{Collection, Document, DocumentId, Fields};

/// Collection-scoped document storage.
///
/// Each call is atomic for the single document it touches. No guarantee spans
/// more than one call.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Store a new document and return its freshly assigned identifier.
    async fn insert_one(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> Result<DocumentId, StoreError>;

    /// Store several documents in one round-trip.
    ///
    /// Identifiers are returned in the same order as `documents`.
    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Fields>,
    ) -> Result<Vec<DocumentId>, StoreError>;

    /// Every document in the collection, in insertion order.
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    /// Overwrite or add the named fields on one document.
    ///
    /// Returns `true` if a document with that id existed.
    async fn update_fields(
        &self,
        collection: Collection,
        id: DocumentId,
        fields: Fields,
    ) -> Result<bool, StoreError>;

    /// Remove a document.
    ///
    /// Returns `true` if the document was deleted, `false` if it did not exist.
    async fn delete(&self, collection: Collection, id: DocumentId) -> Result<bool, StoreError>;

    /// Round-trip to the backend to confirm it is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
