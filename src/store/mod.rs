//! Document store
//!
//! Trips are persisted as schemaless JSON documents grouped in collections.
//! [`DocumentStore`] is the contract the rest of the crate relies on; the
//! in-memory and fjall backends implement it, and [`TripRepository`] maps
//! trips onto it.

pub mod fjall_store;
pub mod memory;
pub mod repository;

use async_trait::async_trait;
use rand::RngExt;
use serde_json::{Map, Value};
use thiserror::Error;

pub use fjall_store::FjallStore;
pub use memory::MemoryStore;
pub use repository::TripRepository;

/// A stored record: top-level string keys with arbitrary JSON values
pub type Document = Map<String, Value>;

/// Length of generated document ids
pub const ID_LENGTH: usize = 20;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document '{0}' not found")]
    NotFound(String),

    #[error("store backend failure: {0}")]
    Backend(String),

    #[error("document is not valid JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("index encoding failed: {0}")]
    Encoding(#[from] postcard::Error),

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<fjall::Error> for StoreError {
    fn from(e: fjall::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

/// Random alphanumeric document id
#[must_use]
pub fn generate_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LENGTH)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect()
}

/// Operations required from a document store.
///
/// Reads of missing documents return `None` rather than an error. Backend
/// and I/O failures surface as [`StoreError`]; there are no retries.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a new document and return its generated id
    async fn create(&self, collection: &str, document: Document) -> Result<String, StoreError>;

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Every document of the collection with its id, in creation order
    async fn list_all(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError>;

    /// Overwrite the given top-level fields of an existing document.
    /// Fails with [`StoreError::NotFound`] when the document does not exist.
    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError>;

    /// Remove a document. Deleting a missing document succeeds.
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError>;
}

/// Merge `fields` into `document`, replacing existing top-level keys
pub(crate) fn merge_fields(document: &mut Document, fields: Document) {
    for (key, value) in fields {
        document.insert(key, value);
    }
}
