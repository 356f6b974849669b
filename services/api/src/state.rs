//! Application state shared across handlers

use std::sync::Arc;

use common::store::DocumentStore;

use crate::repositories::{PotholeRepository, TrafficLightRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub user_repository: UserRepository,
    pub pothole_repository: PotholeRepository,
    pub traffic_light_repository: TrafficLightRepository,
}

impl AppState {
    /// Build the state and its repositories over one store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            user_repository: UserRepository::new(store.clone()),
            pothole_repository: PotholeRepository::new(store.clone()),
            traffic_light_repository: TrafficLightRepository::new(store.clone()),
            store,
        }
    }
}
