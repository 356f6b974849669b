//! User repository for document store operations

use std::sync::Arc;

use common::{
    collections::USERS,
    error::DatabaseResult,
    store::{Document, DocumentStore, to_document},
};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::decode;
use crate::models::user::{NewUser, User};

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Create a new user
    ///
    /// Fails with a duplicate key error when the username or email is taken.
    pub async fn create(&self, new_user: &NewUser) -> DatabaseResult<Uuid> {
        info!("Creating new user: {}", new_user.username);
        self.store.insert(&USERS, to_document(new_user)?).await
    }

    /// Find a user by username
    pub async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let mut filter = Document::new();
        filter.insert("username".to_string(), Value::String(username.to_string()));

        self.store
            .find_one(&USERS, &filter)
            .await?
            .map(decode)
            .transpose()
    }
}
