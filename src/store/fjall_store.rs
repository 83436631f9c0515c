use std::path::Path;

use async_trait::async_trait;
use fjall::Keyspace;
use tokio::sync::Mutex;
use tokio::task;

use super::{Document, DocumentStore, StoreError, generate_id, merge_fields};

#[derive(Clone)]
struct Keyspaces {
    db: fjall::Database,
    documents: Keyspace,
    indexes: Keyspace,
}

fn document_key(collection: &str, id: &str) -> Vec<u8> {
    format!("{collection}/{id}").into_bytes()
}

impl Keyspaces {
    fn read_document(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        match self.documents.get(document_key(collection, id))? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn write_document(&self, collection: &str, id: &str, document: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(document)?;
        self.documents.insert(document_key(collection, id), bytes)?;
        Ok(())
    }

    /// Insert a document and append its id to the index in one batch
    fn insert_indexed(
        &self,
        collection: &str,
        id: &str,
        document: &Document,
        ids: &[String],
    ) -> Result<(), StoreError> {
        let mut batch = self.db.batch();
        batch.insert(&self.documents, document_key(collection, id), serde_json::to_vec(document)?);
        batch.insert(&self.indexes, collection.as_bytes().to_vec(), postcard::to_stdvec(ids)?);
        batch.commit()?;
        Ok(())
    }

    /// Remove a document and rewrite the index in one batch
    fn remove_indexed(&self, collection: &str, id: &str, ids: &[String]) -> Result<(), StoreError> {
        let mut batch = self.db.batch();
        batch.remove(&self.documents, document_key(collection, id));
        batch.insert(&self.indexes, collection.as_bytes().to_vec(), postcard::to_stdvec(ids)?);
        batch.commit()?;
        Ok(())
    }

    fn read_index(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        match self.indexes.get(collection.as_bytes().to_vec())? {
            Some(bytes) => Ok(postcard::from_bytes(&bytes)?),
            None => Ok(Vec::new()),
        }
    }
}

/// On-disk store backed by a fjall database.
///
/// Documents are JSON under `{collection}/{id}` in the `documents` keyspace.
/// The `indexes` keyspace keeps, per collection, the postcard-encoded list of
/// ids in creation order.
pub struct FjallStore {
    keyspaces: Keyspaces,
    /// Serializes index read-modify-write cycles
    write_lock: Mutex<()>,
}

impl FjallStore {
    /// Open (or create) the database at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db = fjall::Database::builder(&path).open()?;
        let documents = db.keyspace("documents", fjall::KeyspaceCreateOptions::default)?;
        let indexes = db.keyspace("indexes", fjall::KeyspaceCreateOptions::default)?;
        tracing::info!("Opened trip store at {}", path.as_ref().display());
        Ok(FjallStore {
            keyspaces: Keyspaces {
                db,
                documents,
                indexes,
            },
            write_lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl DocumentStore for FjallStore {
    #[tracing::instrument(name = "store_create", level = "debug", skip(self, document))]
    async fn create(&self, collection: &str, document: Document) -> Result<String, StoreError> {
        let _guard = self.write_lock.lock().await;
        let keyspaces = self.keyspaces.clone();
        let collection = collection.to_string();

        task::spawn_blocking(move || -> Result<String, StoreError> {
            let mut ids = keyspaces.read_index(&collection)?;
            let mut id = generate_id();
            while ids.contains(&id) {
                id = generate_id();
            }
            ids.push(id.clone());
            keyspaces.insert_indexed(&collection, &id, &document, &ids)?;
            tracing::debug!("Created document {}", id);
            Ok(id)
        })
        .await?
    }

    #[tracing::instrument(name = "store_get", level = "debug", skip(self))]
    async fn get_by_id(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let keyspaces = self.keyspaces.clone();
        let collection = collection.to_string();
        let id = id.to_string();
        task::spawn_blocking(move || keyspaces.read_document(&collection, &id)).await?
    }

    #[tracing::instrument(name = "store_list", level = "debug", skip(self))]
    async fn list_all(&self, collection: &str) -> Result<Vec<(String, Document)>, StoreError> {
        let keyspaces = self.keyspaces.clone();
        let collection = collection.to_string();

        task::spawn_blocking(move || -> Result<Vec<(String, Document)>, StoreError> {
            let mut documents = Vec::new();
            for id in keyspaces.read_index(&collection)? {
                match keyspaces.read_document(&collection, &id)? {
                    Some(document) => documents.push((id, document)),
                    None => tracing::warn!("Index entry {} has no document", id),
                }
            }
            Ok(documents)
        })
        .await?
    }

    #[tracing::instrument(name = "store_update", level = "debug", skip(self, fields))]
    async fn update(&self, collection: &str, id: &str, fields: Document) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let keyspaces = self.keyspaces.clone();
        let collection = collection.to_string();
        let id = id.to_string();

        task::spawn_blocking(move || -> Result<(), StoreError> {
            let mut document = keyspaces
                .read_document(&collection, &id)?
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            merge_fields(&mut document, fields);
            keyspaces.write_document(&collection, &id, &document)
        })
        .await?
    }

    #[tracing::instrument(name = "store_delete", level = "debug", skip(self))]
    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let keyspaces = self.keyspaces.clone();
        let collection = collection.to_string();
        let id = id.to_string();

        task::spawn_blocking(move || -> Result<(), StoreError> {
            let mut ids = keyspaces.read_index(&collection)?;
            ids.retain(|existing| *existing != id);
            keyspaces.remove_indexed(&collection, &id, &ids)
        })
        .await?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let dir = TempDir::new().unwrap();
        let store = FjallStore::open(dir.path().join("db")).unwrap();
        let id = store
            .create("trips", doc(json!({ "name": "Alps", "cities": ["Zurich"] })))
            .await
            .unwrap();

        let loaded = store.get_by_id("trips", &id).await.unwrap().unwrap();
        assert_eq!(loaded["cities"], json!(["Zurich"]));
        assert!(store.get_by_id("trips", "missing").await.unwrap().is_none());
        assert_eq!(store.list_all("trips").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_collections_are_separate() {
        let dir = TempDir::new().unwrap();
        let store = FjallStore::open(dir.path()).unwrap();
        let id = store.create("trips", doc(json!({ "name": "A" }))).await.unwrap();
        store.create("drafts", doc(json!({ "name": "B" }))).await.unwrap();

        assert!(store.get_by_id("drafts", &id).await.unwrap().is_none());
        let trips = store.list_all("trips").await.unwrap();
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].0, id);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let dir = TempDir::new().unwrap();
        let store = FjallStore::open(dir.path()).unwrap();
        let first = store.create("trips", doc(json!({ "name": "A" }))).await.unwrap();
        let second = store.create("trips", doc(json!({ "name": "B" }))).await.unwrap();

        store
            .update("trips", &first, doc(json!({ "description": "updated" })))
            .await
            .unwrap();
        let loaded = store.get_by_id("trips", &first).await.unwrap().unwrap();
        assert_eq!(loaded["name"], "A");
        assert_eq!(loaded["description"], "updated");

        assert!(matches!(
            store.update("trips", "nope", Document::new()).await,
            Err(StoreError::NotFound(_))
        ));

        store.delete("trips", &first).await.unwrap();
        store.delete("trips", "nope").await.unwrap();
        let ids: Vec<String> = store
            .list_all("trips")
            .await
            .unwrap()
            .into_iter()
            .map(|(id, _)| id)
            .collect();
        assert_eq!(ids, vec![second]);
    }

    #[tokio::test]
    async fn test_index_and_documents_agree() {
        let dir = TempDir::new().unwrap();
        let store = FjallStore::open(dir.path()).unwrap();
        let mut ids = Vec::new();
        for name in ["A", "B", "C", "D"] {
            ids.push(store.create("trips", doc(json!({ "name": name }))).await.unwrap());
        }
        store.delete("trips", &ids[1]).await.unwrap();
        store.delete("trips", &ids[3]).await.unwrap();

        let listed = store.list_all("trips").await.unwrap();
        let listed_ids: Vec<&str> = listed.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(listed_ids, vec![ids[0].as_str(), ids[2].as_str()]);
        for id in &ids {
            let listed_doc = listed.iter().find(|(listed_id, _)| listed_id == id).map(|(_, d)| d);
            let stored = store.get_by_id("trips", id).await.unwrap();
            assert_eq!(listed_doc, stored.as_ref());
        }
    }
}
