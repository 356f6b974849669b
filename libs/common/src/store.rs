//! Document store abstraction
//!
//! Documents are schema-flexible JSON objects grouped into named
//! [`Collection`]s. Every stored document carries a storage-assigned UUID
//! which is reported as `_id` when the document is read back.

use async_trait::async_trait;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::collections::Collection;
use crate::error::{DatabaseError, DatabaseResult};

/// Field under which the storage-assigned id is exposed
pub const ID_FIELD: &str = "_id";

/// A JSON object document
pub type Document = Map<String, Value>;

/// A document read back from storage together with its id
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub document: Document,
}

impl StoredDocument {
    /// The document with its id inserted under `_id`
    pub fn into_json(self) -> Value {
        let mut document = self.document;
        document.insert(ID_FIELD.to_string(), Value::String(self.id.to_string()));
        Value::Object(document)
    }
}

/// Convert a serializable value into a document, rejecting non-objects
pub fn to_document<T: serde::Serialize>(value: &T) -> DatabaseResult<Document> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        other => Err(DatabaseError::InvalidDocument(format!(
            "Documents must be JSON objects, got {}",
            other
        ))),
    }
}

/// Schema-flexible storage of JSON documents in named collections
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return its new id
    ///
    /// Fails with [`DatabaseError::DuplicateKey`] without storing anything when
    /// another document already holds the same value for one of the
    /// collection's unique keys.
    async fn insert(&self, collection: &Collection, document: Document) -> DatabaseResult<Uuid>;

    /// Insert documents in order and return their ids
    async fn insert_many(
        &self,
        collection: &Collection,
        documents: Vec<Document>,
    ) -> DatabaseResult<Vec<Uuid>> {
        let mut ids = Vec::with_capacity(documents.len());
        for document in documents {
            ids.push(self.insert(collection, document).await?);
        }
        Ok(ids)
    }

    /// First document whose fields equal every field of `filter`
    async fn find_one(
        &self,
        collection: &Collection,
        filter: &Document,
    ) -> DatabaseResult<Option<StoredDocument>>;

    /// Every document of the collection in insertion order
    async fn find_all(&self, collection: &Collection) -> DatabaseResult<Vec<StoredDocument>>;

    /// Shallow-merge `changes` into the document with `id`
    ///
    /// Returns `false` when no document has that id.
    async fn update_by_id(
        &self,
        collection: &Collection,
        id: Uuid,
        changes: Document,
    ) -> DatabaseResult<bool>;

    /// Remove every document of the collection
    async fn drop_collection(&self, collection: &Collection) -> DatabaseResult<()>;

    /// Verify that storage is reachable
    async fn ping(&self) -> DatabaseResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_into_json_exposes_id() {
        let id = Uuid::new_v4();
        let stored = StoredDocument {
            id,
            document: to_document(&json!({"status": "reported"})).unwrap(),
        };

        let value = stored.into_json();
        assert_eq!(value["_id"], json!(id.to_string()));
        assert_eq!(value["status"], json!("reported"));
    }

    #[test]
    fn test_to_document_rejects_non_objects() {
        assert!(to_document(&json!([1, 2, 3])).is_err());
        assert!(to_document(&json!("text")).is_err());
    }
}
