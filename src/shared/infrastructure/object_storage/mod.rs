// Raw object storage port: keyed blobs, no knowledge of what they contain.
//
// Responsibilities
// - Report a missing key as `Ok(None)`, never as an error. Callers rely on this to detect
//   a cold start.
// - Surface every other fault (connectivity, permissions) as `ObjectStorageError`.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObjectStorageError {
    #[error("backend error: {0}")]
    Backend(String),
}

#[async_trait]
pub trait ObjectStorage: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, ObjectStorageError>;
    async fn put(&self, key: &str, body: Bytes) -> Result<(), ObjectStorageError>;
    /// Keys stored under `prefix`, sorted ascending.
    async fn list(&self, prefix: &str) -> Result<Vec<String>, ObjectStorageError>;
}

pub mod in_memory;
pub mod object_store_backed;
