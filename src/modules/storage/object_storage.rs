use async_trait::async_trait;

use crate::core::error::Result;

/// Locator returned by a successful write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub key: String,
    pub url: String,
}

/// Object storage the upload ingress writes to.
///
/// Implementations must report failures as `AppError::StorageFailure`.
/// The ingress performs no retries, so a failed `put` is final for that request.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Store `data` under `key` and return its public locator
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<StoredObject>;
}
