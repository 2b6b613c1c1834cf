use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::error::StoreError;
use super::traits::DocumentStore;
use crate::document::{Collection, Document, DocumentId, Fields, apply_update};

/// In-process document store.
///
/// Documents live in per-collection vectors kept in insertion order. Useful
/// for local runs and tests; contents are lost when the process exits.
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
    available: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            collections: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Simulate the backend going away (or coming back).
    ///
    /// While unavailable every operation, including `ping`, fails with
    /// [`StoreError::Unavailable`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable("memory store is offline".into()))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(
        &self,
        collection: Collection,
        fields: Fields,
    ) -> Result<DocumentId, StoreError> {
        self.check_available()?;
        let id = DocumentId::generate();
        let mut body = Fields::new();
        apply_update(&mut body, fields);

        let mut collections = self.collections.write().await;
        collections
            .entry(collection)
            .or_default()
            .push(Document::new(id, body));
        Ok(id)
    }

    async fn insert_many(
        &self,
        collection: Collection,
        documents: Vec<Fields>,
    ) -> Result<Vec<DocumentId>, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection).or_default();

        let mut ids = Vec::with_capacity(documents.len());
        for fields in documents {
            let id = DocumentId::generate();
            let mut body = Fields::new();
            apply_update(&mut body, fields);
            docs.push(Document::new(id, body));
            ids.push(id);
        }
        Ok(ids)
    }

    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        self.check_available()?;
        let collections = self.collections.read().await;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn update_fields(
        &self,
        collection: Collection,
        id: DocumentId,
        fields: Fields,
    ) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.id == id))
        else {
            return Ok(false);
        };
        apply_update(&mut doc.fields, fields);
        Ok(true)
    }

    async fn delete(&self, collection: Collection, id: DocumentId) -> Result<bool, StoreError> {
        self.check_available()?;
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() != before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_available()
    }
}
