// ObjectStorage port over the `object_store` crate.
//
// Purpose
// - One adapter for every backend `object_store` supports (local filesystem, S3, in memory).
//
// Notes
// - `object_store` matches list prefixes on whole path segments. Listing here starts at the
//   prefix's parent segment and filters on the raw string, so "2024-01" finds "2024-01-10/a.csv"
//   the same way S3 prefixes and the in memory adapter do.

use crate::shared::infrastructure::object_storage::{ObjectStorage, ObjectStorageError};
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::path::Path;
use object_store::{ObjectMeta, ObjectStore, PutPayload};
use std::sync::Arc;

pub struct ObjectStoreStorage {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreStorage {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }
}

fn backend(error: object_store::Error) -> ObjectStorageError {
    ObjectStorageError::Backend(error.to_string())
}

#[async_trait::async_trait]
impl ObjectStorage for ObjectStoreStorage {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, ObjectStorageError> {
        match self.store.get(&Path::from(key)).await {
            Ok(result) => Ok(Some(result.bytes().await.map_err(backend)?)),
            Err(object_store::Error::NotFound { .. }) => Ok(None),
            Err(error) => Err(backend(error)),
        }
    }

    async fn put(&self, key: &str, body: Bytes) -> Result<(), ObjectStorageError> {
        tracing::debug!(key, bytes = body.len(), "putting object");
        self.store
            .put(&Path::from(key), PutPayload::from(body))
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>, ObjectStorageError> {
        let parent = prefix
            .rsplit_once('/')
            .map(|(parent, _)| parent)
            .filter(|parent| !parent.is_empty())
            .map(Path::from);
        let objects: Vec<ObjectMeta> = self
            .store
            .list(parent.as_ref())
            .try_collect()
            .await
            .map_err(backend)?;
        let mut keys: Vec<String> = objects
            .into_iter()
            .map(|meta| meta.location.to_string())
            .filter(|key| key.starts_with(prefix))
            .collect();
        keys.sort();
        Ok(keys)
    }
}
