//! Common library for the road safety services
//!
//! This crate provides the storage layer shared by the API and seed
//! services: connection management, the document store abstraction with its
//! PostgreSQL and in-memory backends, the named collections, password
//! hashing, and error types.

pub mod collections;
pub mod database;
pub mod error;
pub mod memory;
pub mod password;
pub mod postgres;
pub mod store;

/// Example usage of the storage layer
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use common::collections::POTHOLES;
/// use common::database::{ConnectionManager, DatabaseConfig};
/// use common::postgres::PgDocumentStore;
/// use common::store::DocumentStore;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = DatabaseConfig::from_env()?;
///     let manager = Arc::new(ConnectionManager::new(config));
///     let store = PgDocumentStore::new(manager.clone());
///     let potholes = store.find_all(&POTHOLES).await?;
///     println!("{} potholes reported", potholes.len());
///     manager.release().await;
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
