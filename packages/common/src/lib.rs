pub mod document;
pub mod store;

pub use document::{Collection, Document, DocumentId, Fields, InvalidDocumentId};
pub use store::{DocumentStore, MemoryStore, StoreError};
