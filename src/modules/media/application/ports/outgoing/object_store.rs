use async_trait::async_trait;
use std::time::Duration;

// Error Types

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ObjectStoreError {
    #[error("Access denied")]
    AccessDenied,

    #[error("Bucket not found")]
    BucketNotFound,

    #[error("Object not found")]
    ObjectNotFound,

    #[error("Object store did not respond within {0:?}")]
    Timeout(Duration),

    #[error("Invalid configuration")]
    Configuration,

    #[error("Infrastructure error: {0}")]
    Infrastructure(String),
}

// Port Interface

/// Bucket-scoped object storage.
///
/// Keys are bucket-relative paths (`image/1700000000.png`). Implementations
/// must be cheap to clone and share one underlying client across requests.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key`, tagging the object with `content_type`.
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStoreError>;

    /// Removes every key in `keys`. Fails if any single removal fails.
    async fn remove(&self, bucket: &str, keys: &[String]) -> Result<(), ObjectStoreError>;

    /// Returns a pre-authorized URL the client can `PUT` the object to directly.
    async fn sign_upload_url(
        &self,
        bucket: &str,
        key: &str,
        content_type: &str,
        ttl: Duration,
    ) -> Result<String, ObjectStoreError>;
}
