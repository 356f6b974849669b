//! Drops and repopulates the collections with fixture data

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use common::{
    collections::{self, POTHOLES, TRAFFIC_LIGHTS, USERS},
    database::{ConnectionManager, DatabaseConfig},
    password::hash_password,
    postgres::PgDocumentStore,
    store::{Document, DocumentStore, to_document},
};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Number of documents inserted per collection
#[derive(Debug, Default, PartialEq, Eq)]
struct SeedSummary {
    users: usize,
    potholes: usize,
    traffic_lights: usize,
}

fn sample_users() -> Result<Vec<Document>> {
    let now = Utc::now();
    let users = [
        ("Test User", "user1@example.com", "user1", "password123"),
        ("Demo User", "user2@example.com", "user2", "password456"),
    ];

    users
        .into_iter()
        .map(|(fullname, email, username, password)| -> Result<Document> {
            let password_hash = hash_password(password)?;
            Ok(to_document(&json!({
                "fullname": fullname,
                "email": email,
                "username": username,
                "passwordHash": password_hash,
                "createdAt": now,
            }))?)
        })
        .collect()
}

fn sample_potholes() -> Result<Vec<Document>> {
    let now = Utc::now();
    let potholes = [
        (40.7128, -74.0060, "high", "Large pothole near Times Square", "reported"),
        (40.7306, -73.9352, "medium", "Medium sized pothole on Main Street", "reported"),
        (40.6782, -73.9442, "low", "Small pothole near the park", "fixed"),
    ];

    potholes
        .into_iter()
        .map(|(latitude, longitude, severity, description, status)| -> Result<Document> {
            Ok(to_document(&json!({
                "latitude": latitude,
                "longitude": longitude,
                "severity": severity,
                "description": description,
                "status": status,
                "reportedAt": now,
            }))?)
        })
        .collect()
}

fn sample_traffic_lights() -> Result<Vec<Document>> {
    let now = Utc::now();
    let issues = [
        ("Broadway & W 42nd St", "not_working", "Signal completely dark", "pending"),
        ("5th Ave & E 23rd St", "flickering", "Red light flickers at night", "in_progress"),
    ];

    issues
        .into_iter()
        .map(|(location, issue_type, description, status)| -> Result<Document> {
            Ok(to_document(&json!({
                "location": location,
                "issueType": issue_type,
                "description": description,
                "status": status,
                "timestamp": now,
                "updatedAt": now,
            }))?)
        })
        .collect()
}

/// Drop every collection and insert the fixtures
async fn populate(store: &dyn DocumentStore) -> Result<SeedSummary> {
    info!("Dropping existing collections");
    for collection in collections::ALL {
        if let Err(e) = store.drop_collection(&collection).await {
            warn!("Could not drop {}, continuing: {}", collection.name, e);
        }
    }

    info!("Inserting sample users");
    let users = store.insert_many(&USERS, sample_users()?).await?.len();

    info!("Inserting sample potholes");
    let potholes = store.insert_many(&POTHOLES, sample_potholes()?).await?.len();

    info!("Inserting sample traffic light issues");
    let traffic_lights = store
        .insert_many(&TRAFFIC_LIGHTS, sample_traffic_lights()?)
        .await?
        .len();

    Ok(SeedSummary {
        users,
        potholes,
        traffic_lights,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting database initialization");

    let manager = Arc::new(ConnectionManager::new(DatabaseConfig::from_env()?));
    manager.acquire().await?;
    let store = PgDocumentStore::new(manager.clone());

    let result = populate(&store).await;
    manager.release().await;

    let summary = result?;
    info!(
        users = summary.users,
        potholes = summary.potholes,
        traffic_lights = summary.traffic_lights,
        "Database initialization complete"
    );

    Ok(())
}
