use std::sync::Arc;
use std::time::Duration;

use routewise_storage::{AttachmentService, MemoryObjectStore, ObjectStore, S3ObjectStore};

use crate::config::{ServerConfig, StorageBackend, StorageConfig};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: the pool and the object store are handles.
#[derive(Clone)]
pub struct AppState {
    pub pool: routewise_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// File attachment protocol over the configured object store.
    pub attachments: AttachmentService,
}

impl AppState {
    pub fn new(pool: routewise_db::DbPool, config: ServerConfig, store: Arc<dyn ObjectStore>) -> Self {
        let timeout = Duration::from_secs(config.storage.timeout_secs);
        Self {
            attachments: AttachmentService::new(pool.clone(), store, timeout),
            pool,
            config: Arc::new(config),
        }
    }
}

/// Construct the object store selected by configuration.
pub async fn connect_object_store(config: &StorageConfig) -> Arc<dyn ObjectStore> {
    match config.backend {
        StorageBackend::S3 => Arc::new(
            S3ObjectStore::connect(
                config.bucket.clone(),
                config.region.clone(),
                config.endpoint_url.clone(),
            )
            .await,
        ),
        StorageBackend::Memory => {
            tracing::warn!(bucket = %config.bucket, "Using in-memory object store; uploads are not persisted");
            Arc::new(MemoryObjectStore::new(config.bucket.clone()))
        }
    }
}
