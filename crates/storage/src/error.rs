use std::time::Duration;

/// Failures raised by an [`ObjectStore`](crate::ObjectStore) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Object store {operation} failed for '{key}': {message}")]
    Backend {
        operation: &'static str,
        key: String,
        message: String,
    },

    #[error("Object store {operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Cannot sign URL for '{key}': {message}")]
    Signing { key: String, message: String },
}

impl StorageError {
    pub fn backend(operation: &'static str, key: &str, message: impl ToString) -> Self {
        Self::Backend {
            operation,
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}
