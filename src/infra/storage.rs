//! Builds the configured [`CatalogStore`].

use crate::infra::config::StorageBackend;
use crate::storage::{CatalogStore, MemoryCatalogStore, PgCatalogStore, StorageResult};
use std::sync::Arc;

/// Connects to the configured backend without touching its schema.
pub async fn connect_store(backend: &StorageBackend) -> StorageResult<Arc<dyn CatalogStore>> {
    let store: Arc<dyn CatalogStore> = match backend {
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            tracing::info!(max_connections, "connecting to PostgreSQL");
            Arc::new(PgCatalogStore::connect(database_url, *max_connections).await?)
        }
        StorageBackend::Memory => {
            tracing::warn!("using the in-memory store; data is lost on exit");
            Arc::new(MemoryCatalogStore::new())
        }
    };
    Ok(store)
}

/// Connects and makes sure the catalog tables exist.
pub async fn open_store(backend: &StorageBackend) -> StorageResult<Arc<dyn CatalogStore>> {
    let store = connect_store(backend).await?;
    store.ensure_schema().await?;
    Ok(store)
}
