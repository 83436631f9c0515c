use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, StoreError, generate_id, merge_fields};

#[derive(Default)]
struct Collection {
    /// Creation order
    ids: Vec<String>,
    documents: HashMap<String, Document>,
}

/// In-memory store for tests and local development
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn create(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let mut collections = self.collections.write().await;
        let entry = collections.entry(collection.to_string()).or_default();
        let mut id = generate_id();
        while entry.documents.contains_key(&id) {
            id = generate_id();
        }
        entry.ids.push(id.clone());
        entry.documents.insert(id.clone(), document);
        Ok(id)
    }

    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|c| c.documents.get(id))
            .cloned())
    }

    async fn list_all(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError> {
        let collections = self.collections.read().await;
        let Some(entry) = collections.get(collection) else {
            return Ok(Vec::new());
        };
        Ok(entry
            .ids
            .iter()
            .filter_map(|id| entry.documents.get(id).map(|doc| (id.clone(), doc.clone())))
            .collect())
    }

    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|c| c.documents.get_mut(id))
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        merge_fields(document, fields);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;
        if let Some(entry) = collections.get_mut(collection)
            && entry.documents.remove(id).is_some()
        {
            entry.ids.retain(|existing| existing != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = MemoryStore::new();
        let id = store.create("trips", doc(json!({ "name": "A" }))).await.unwrap();
        let loaded = store.get_by_id("trips", &id).await.unwrap().unwrap();
        assert_eq!(loaded["name"], "A");
        assert!(store.get_by_id("other", &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_keeps_creation_order() {
        let store = MemoryStore::new();
        let mut ids = Vec::new();
        for name in ["A", "B", "C"] {
            ids.push(store.create("trips", doc(json!({ "name": name }))).await.unwrap());
        }
        let listed: Vec<String> = store
            .list_all("trips")
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(listed, ids);
        assert!(store.list_all("empty").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let store = MemoryStore::new();
        let id = store.create("trips", doc(json!({ "name": "A", "description": "d" }))).await.unwrap();

        store.update("trips", &id, doc(json!({ "name": "B" }))).await.unwrap();
        let loaded = store.get_by_id("trips", &id).await.unwrap().unwrap();
        assert_eq!(loaded["name"], "B");
        assert_eq!(loaded["description"], "d");

        let err = store.update("trips", "missing", Document::new()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(ref missing) if missing == "missing"));

        store.delete("trips", &id).await.unwrap();
        store.delete("trips", &id).await.unwrap();
        assert!(store.get_by_id("trips", &id).await.unwrap().is_none());
        assert!(store.list_all("trips").await.unwrap().is_empty());
    }
}
