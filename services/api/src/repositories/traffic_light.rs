//! Traffic-light issue repository for document store operations

use std::sync::Arc;

use common::{
    collections::TRAFFIC_LIGHTS,
    error::DatabaseResult,
    store::{DocumentStore, StoredDocument, to_document},
};
use serde_json::Value;
use uuid::Uuid;

use crate::models::traffic_light::{NewTrafficLightIssue, StatusChange};

/// Traffic-light issue repository
#[derive(Clone)]
pub struct TrafficLightRepository {
    store: Arc<dyn DocumentStore>,
}

impl TrafficLightRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Get every reported traffic-light issue, `_id` included, as stored
    pub async fn get_all(&self) -> DatabaseResult<Vec<Value>> {
        Ok(self
            .store
            .find_all(&TRAFFIC_LIGHTS)
            .await?
            .into_iter()
            .map(StoredDocument::into_json)
            .collect())
    }

    /// Store a new traffic-light issue
    pub async fn create(&self, issue: &NewTrafficLightIssue) -> DatabaseResult<Uuid> {
        self.store.insert(&TRAFFIC_LIGHTS, to_document(issue)?).await
    }

    /// Apply a status change, returning `false` when no issue has `id`
    pub async fn update_status(&self, id: Uuid, change: &StatusChange) -> DatabaseResult<bool> {
        self.store
            .update_by_id(&TRAFFIC_LIGHTS, id, to_document(change)?)
            .await
    }
}
