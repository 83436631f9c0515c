use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use super::{Document, DocumentStore, StoreError};
use crate::ViajarteError;
use crate::models::Trip;
use crate::sanitizer::sanitize;

/// Default collection holding trips
pub const TRIPS_COLLECTION: &str = "trips";

/// Persists trips in a [`DocumentStore`] collection.
///
/// Everything read back goes through the sanitizer, so callers always get a
/// well-formed [`Trip`] whatever the stored document looks like.
#[derive(Clone)]
pub struct TripRepository {
    store: Arc<dyn DocumentStore>,
    collection: String,
}

impl TripRepository {
    pub fn new(store: Arc<dyn DocumentStore>, collection: impl Into<String>) -> Self {
        Self {
            store,
            collection: collection.into(),
        }
    }

    /// Repository over the default `trips` collection
    pub fn with_default_collection(store: Arc<dyn DocumentStore>) -> Self {
        Self::new(store, TRIPS_COLLECTION)
    }

    /// Validate and store a new trip, returning its id
    pub async fn create(&self, trip: &Trip) -> crate::Result<String> {
        trip.validate_for_save()?;
        let id = self
            .store
            .create(&self.collection, to_document(trip)?)
            .await?;
        info!("Created trip '{}' with id {}", trip.name, id);
        Ok(id)
    }

    /// Load one trip; `None` when it does not exist
    pub async fn load(&self, id: &str) -> crate::Result<Option<Trip>> {
        let Some(document) = self.store.get_by_id(&self.collection, id).await? else {
            debug!("Trip {} not found", id);
            return Ok(None);
        };
        Ok(Some(from_document(id, document)))
    }

    /// All trips in creation order
    pub async fn list(&self) -> crate::Result<Vec<Trip>> {
        let documents = self.store.list_all(&self.collection).await?;
        debug!("Loaded {} trips", documents.len());
        Ok(documents
            .into_iter()
            .map(|(id, document)| from_document(&id, document))
            .collect())
    }

    /// Write back an existing trip in full
    pub async fn save(&self, trip: &Trip) -> crate::Result<()> {
        let Some(id) = trip.id.as_deref() else {
            return Err(ViajarteError::validation(
                "Trip has no id; create it before saving",
            ));
        };
        trip.validate_for_save()?;
        self.store
            .update(&self.collection, id, to_document(trip)?)
            .await?;
        info!("Saved trip '{}' ({})", trip.name, id);
        Ok(())
    }

    pub async fn delete(&self, id: &str) -> crate::Result<()> {
        self.store.delete(&self.collection, id).await?;
        info!("Deleted trip {}", id);
        Ok(())
    }
}

/// Stored shape of a trip; the id lives in the key, not the document
fn to_document(trip: &Trip) -> crate::Result<Document> {
    match serde_json::to_value(trip).map_err(StoreError::from)? {
        Value::Object(mut document) => {
            document.remove("id");
            Ok(document)
        }
        _ => Err(ViajarteError::general("Trip did not serialize to an object")),
    }
}

fn from_document(id: &str, mut document: Document) -> Trip {
    document.insert("id".to_string(), Value::String(id.to_string()));
    sanitize(&Value::Object(document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn repository() -> (Arc<MemoryStore>, TripRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = TripRepository::with_default_collection(store.clone());
        (store, repo)
    }

    #[tokio::test]
    async fn test_legacy_documents_are_sanitized() {
        let (store, repo) = repository();
        let Value::Object(legacy) = json!({ "title": 3, "cities": ["Rome", { "city": "Paris" }] }) else {
            unreachable!()
        };
        let id = store.create(TRIPS_COLLECTION, legacy).await.unwrap();

        let trip = repo.load(&id).await.unwrap().unwrap();
        assert_eq!(trip.id.as_deref(), Some(id.as_str()));
        assert_eq!(trip.name, crate::models::trip::UNTITLED_TRIP);
        assert_eq!(trip.cities[1].name, "Paris");
        assert_eq!(repo.list().await.unwrap(), vec![trip]);
    }

    #[tokio::test]
    async fn test_create_requires_valid_trip() {
        let (_, repo) = repository();
        let trip = Trip::new("Empty").with_dates(date("2025-06-10"), date("2025-06-12"));
        let err = repo.create(&trip).await.unwrap_err();
        assert!(matches!(err, ViajarteError::Validation { .. }));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_without_id_is_rejected() {
        let (_, repo) = repository();
        let trip = Trip::new("No id");
        assert!(repo.save(&trip).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_trip() {
        let (_, repo) = repository();
        assert!(repo.load("missing").await.unwrap().is_none());
        repo.delete("missing").await.unwrap();
    }
}
