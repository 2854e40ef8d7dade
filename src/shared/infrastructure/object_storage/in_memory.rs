// In memory implementation of the ObjectStorage port.
//
// Purpose
// - Support use case tests and local development without a bucket.
//
// Responsibilities
// - Keep objects in a sorted map so listing is ordered.
// - Simulate an unreachable backend with `toggle_offline`.

use crate::shared::infrastructure::object_storage::{ObjectStorage, ObjectStorageError};
use bytes::Bytes;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryObjectStorage {
    objects: RwLock<BTreeMap<String, Bytes>>,
    is_offline: bool,
}

impl InMemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    fn ensure_online(&self) -> Result<(), ObjectStorageError> {
        if self.is_offline {
            return Err(ObjectStorageError::Backend("Object storage offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl ObjectStorage for InMemoryObjectStorage {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, ObjectStorageError> {
        self.ensure_online()?;
        Ok(self.objects.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, body: Bytes) -> Result<(), ObjectStorageError> {
        self.ensure_online()?;
        self.objects.write().await.insert(key.to_string(), body);
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, ObjectStorageError> {
        self.ensure_online()?;
        Ok(self
            .objects
            .read()
            .await
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }
}
