use std::sync::Arc;

use anyhow::Result;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod error;
mod models;
mod repositories;
mod routes;
mod settings;
mod state;
mod validation;

use common::{
    database::{ConnectionManager, DatabaseConfig},
    memory::MemoryStore,
    postgres::PgDocumentStore,
    store::DocumentStore,
};

use crate::{
    settings::{ServerConfig, StorageBackend},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting road safety API service");

    let config = ServerConfig::load()?;

    let mut manager = None;
    let mut reconnect = None;
    let store: Arc<dyn DocumentStore> = match config.storage_backend {
        StorageBackend::Postgres => {
            let db_config = DatabaseConfig::from_env()?;
            let connection_manager = Arc::new(ConnectionManager::new(db_config));

            // Requests may arrive before the database is reachable; the
            // background task keeps retrying until the pool is established.
            reconnect = Some(connection_manager.clone().connect_with_retry());
            manager = Some(connection_manager.clone());

            Arc::new(PgDocumentStore::new(connection_manager))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; documents are lost on shutdown");
            Arc::new(MemoryStore::new())
        }
    };

    let app = routes::create_router(AppState::new(store));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!("API service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = reconnect {
        handle.abort();
    }
    if let Some(manager) = manager {
        manager.release().await;
    }

    info!("API service shutdown complete");
    Ok(())
}

/// Resolve when Ctrl+C or SIGTERM is received
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => warn!("Received Ctrl+C, shutting down"),
        _ = terminate => warn!("Received SIGTERM, shutting down"),
    }
}
