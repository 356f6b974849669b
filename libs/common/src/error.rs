//! Custom error types for the common library
//!
//! This module defines the storage error type shared by the document store
//! backends and the connection manager.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred while establishing the connection pool
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A connect attempt that was already in progress failed
    #[error("Database connection attempt failed: {0}")]
    ConnectAttemptFailed(String),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// No live connection is held by the connection manager
    #[error("Database not connected")]
    NotConnected,

    /// A unique key of the collection already holds the inserted value
    #[error("Duplicate value for unique key `{key}` in collection `{collection}`")]
    DuplicateKey { collection: String, key: String },

    /// A stored or submitted document could not be (de)serialized
    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A value that is not a JSON object was submitted as a document
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Error occurred while creating collection tables or indexes
    #[error("Database schema error: {0}")]
    Schema(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
