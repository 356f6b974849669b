//! In-process document store
//!
//! Backs tests and local runs without PostgreSQL. Unique keys are checked
//! under the same write lock as the insert, matching the atomicity of the
//! PostgreSQL backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::collections::Collection;
use crate::error::{DatabaseError, DatabaseResult};
use crate::store::{Document, DocumentStore, StoredDocument};

/// Document store holding every collection in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<&'static str, Vec<StoredDocument>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently in `collection`
    pub async fn count(&self, collection: &Collection) -> usize {
        self.collections
            .read()
            .await
            .get(collection.name)
            .map_or(0, Vec::len)
    }
}

fn matches_filter(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

fn duplicate_key(
    collection: &Collection,
    existing: &[StoredDocument],
    document: &Document,
    skip: Option<Uuid>,
) -> Option<&'static str> {
    collection.unique_keys.iter().copied().find(|key| {
        document.get(*key).is_some_and(|value| {
            existing
                .iter()
                .filter(|stored| Some(stored.id) != skip)
                .any(|stored| stored.document.get(*key) == Some(value))
        })
    })
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, collection: &Collection, document: Document) -> DatabaseResult<Uuid> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection.name).or_default();

        if let Some(key) = duplicate_key(collection, documents, &document, None) {
            return Err(DatabaseError::DuplicateKey {
                collection: collection.name.to_string(),
                key: key.to_string(),
            });
        }

        let id = Uuid::new_v4();
        documents.push(StoredDocument { id, document });
        Ok(id)
    }

    async fn find_one(
        &self,
        collection: &Collection,
        filter: &Document,
    ) -> DatabaseResult<Option<StoredDocument>> {
        let collections = self.collections.read().await;

        Ok(collections.get(collection.name).and_then(|documents| {
            documents
                .iter()
                .find(|stored| matches_filter(&stored.document, filter))
                .cloned()
        }))
    }

    async fn find_all(&self, collection: &Collection) -> DatabaseResult<Vec<StoredDocument>> {
        let collections = self.collections.read().await;
        Ok(collections.get(collection.name).cloned().unwrap_or_default())
    }

    async fn update_by_id(
        &self,
        collection: &Collection,
        id: Uuid,
        changes: Document,
    ) -> DatabaseResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(documents) = collections.get_mut(collection.name) else {
            return Ok(false);
        };

        if let Some(key) = duplicate_key(collection, documents, &changes, Some(id)) {
            return Err(DatabaseError::DuplicateKey {
                collection: collection.name.to_string(),
                key: key.to_string(),
            });
        }

        match documents.iter_mut().find(|stored| stored.id == id) {
            Some(stored) => {
                stored.document.extend(changes);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn drop_collection(&self, collection: &Collection) -> DatabaseResult<()> {
        self.collections.write().await.remove(collection.name);
        Ok(())
    }

    async fn ping(&self) -> DatabaseResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::{POTHOLES, TRAFFIC_LIGHTS, USERS};
    use crate::store::to_document;
    use serde_json::json;
    use tokio_test::assert_ok;

    fn user(username: &str, email: &str) -> Document {
        to_document(&json!({"username": username, "email": email})).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_find_one() {
        let store = MemoryStore::new();
        let id = assert_ok!(store.insert(&USERS, user("alice", "alice@example.com")).await);

        let filter = to_document(&json!({"username": "alice"})).unwrap();
        let found = store.find_one(&USERS, &filter).await.unwrap().unwrap();
        assert_eq!(found.id, id);

        let filter = to_document(&json!({"username": "bob"})).unwrap();
        assert!(store.find_one(&USERS, &filter).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_unique_keys() {
        let store = MemoryStore::new();
        assert_ok!(store.insert(&USERS, user("alice", "alice@example.com")).await);

        let result = store.insert(&USERS, user("alice", "other@example.com")).await;
        assert!(matches!(result, Err(DatabaseError::DuplicateKey { ref key, .. }) if key == "username"));

        let result = store.insert(&USERS, user("bob", "alice@example.com")).await;
        assert!(matches!(result, Err(DatabaseError::DuplicateKey { ref key, .. }) if key == "email"));

        assert_eq!(store.count(&USERS).await, 1);
    }

    #[tokio::test]
    async fn test_collections_without_unique_keys_accept_repeats() {
        let store = MemoryStore::new();
        let doc = to_document(&json!({"latitude": 1.0, "longitude": 2.0})).unwrap();

        assert_ok!(store.insert(&POTHOLES, doc.clone()).await);
        assert_ok!(store.insert(&POTHOLES, doc).await);
        assert_eq!(store.count(&POTHOLES).await, 2);
    }

    #[tokio::test]
    async fn test_find_all_preserves_insertion_order() {
        let store = MemoryStore::new();
        let docs = (0..3)
            .map(|n| to_document(&json!({"location": format!("Corner {}", n)})).unwrap())
            .collect();

        let ids = store.insert_many(&TRAFFIC_LIGHTS, docs).await.unwrap();
        let found: Vec<Uuid> = store
            .find_all(&TRAFFIC_LIGHTS)
            .await
            .unwrap()
            .into_iter()
            .map(|stored| stored.id)
            .collect();

        assert_eq!(found, ids);
    }

    #[tokio::test]
    async fn test_update_by_id_merges_fields() {
        let store = MemoryStore::new();
        let doc = to_document(&json!({"location": "Main St", "status": "reported"})).unwrap();
        let id = store.insert(&TRAFFIC_LIGHTS, doc).await.unwrap();

        let changes = to_document(&json!({"status": "resolved"})).unwrap();
        assert!(store.update_by_id(&TRAFFIC_LIGHTS, id, changes).await.unwrap());

        let stored = &store.find_all(&TRAFFIC_LIGHTS).await.unwrap()[0];
        assert_eq!(stored.document["status"], json!("resolved"));
        assert_eq!(stored.document["location"], json!("Main St"));
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_store_untouched() {
        let store = MemoryStore::new();
        let doc = to_document(&json!({"status": "reported"})).unwrap();
        store.insert(&TRAFFIC_LIGHTS, doc).await.unwrap();
        let before = store.find_all(&TRAFFIC_LIGHTS).await.unwrap();

        let changes = to_document(&json!({"status": "resolved"})).unwrap();
        let updated = store
            .update_by_id(&TRAFFIC_LIGHTS, Uuid::new_v4(), changes)
            .await
            .unwrap();

        assert!(!updated);
        assert_eq!(store.find_all(&TRAFFIC_LIGHTS).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_drop_collection_is_repeatable() {
        let store = MemoryStore::new();
        store.insert(&USERS, user("alice", "alice@example.com")).await.unwrap();

        assert_ok!(store.drop_collection(&USERS).await);
        assert_ok!(store.drop_collection(&USERS).await);
        assert_eq!(store.count(&USERS).await, 0);
    }
}
