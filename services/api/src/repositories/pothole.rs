//! Pothole repository for document store operations

use std::sync::Arc;

use common::{
    collections::POTHOLES,
    error::DatabaseResult,
    store::{DocumentStore, StoredDocument, to_document},
};
use serde_json::Value;
use uuid::Uuid;

use crate::models::pothole::NewPothole;

/// Pothole repository
#[derive(Clone)]
pub struct PotholeRepository {
    store: Arc<dyn DocumentStore>,
}

impl PotholeRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Get every reported pothole, `_id` included, as stored
    pub async fn get_all(&self) -> DatabaseResult<Vec<Value>> {
        Ok(self
            .store
            .find_all(&POTHOLES)
            .await?
            .into_iter()
            .map(StoredDocument::into_json)
            .collect())
    }

    /// Store a new pothole report
    pub async fn create(&self, pothole: &NewPothole) -> DatabaseResult<Uuid> {
        self.store.insert(&POTHOLES, to_document(pothole)?).await
    }
}
