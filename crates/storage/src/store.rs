use std::time::Duration;

use async_trait::async_trait;

use crate::error::StorageError;

/// A flat key/value blob store addressed by bucket and key.
///
/// Implementations must be safe to share across request tasks.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Bucket every key of this store lives in.
    fn bucket(&self) -> &str;

    /// Write an object, replacing any existing one under `key`.
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Remove an object. Deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    async fn exists(&self, key: &str) -> Result<bool, StorageError>;

    /// Produce a time-limited URL that grants read access to `key`.
    async fn sign_get(&self, key: &str, ttl: Duration) -> Result<String, StorageError>;
}
