//! Repositories for document store operations
//!
//! Each repository owns one collection and performs exactly one store call
//! per method.

use common::{error::DatabaseResult, store::StoredDocument};
use serde::de::DeserializeOwned;

pub mod pothole;
pub mod traffic_light;
pub mod user;

pub use pothole::PotholeRepository;
pub use traffic_light::TrafficLightRepository;
pub use user::UserRepository;

/// Deserialize a stored document, `_id` included, into a model
fn decode<T: DeserializeOwned>(stored: StoredDocument) -> DatabaseResult<T> {
    Ok(serde_json::from_value(stored.into_json())?)
}
