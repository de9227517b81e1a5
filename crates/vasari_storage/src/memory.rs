//! In-memory object store implementation.
//!
//! Backs tests and embedded deployments where durability is not required.
//! Orchestrator tests also use it to count writes when asserting that
//! failed operations leave no orphaned objects.

use crate::ObjectStore;
use std::collections::HashMap;
use std::sync::RwLock;
use vasari_error::{StorageError, StorageErrorKind, VasariResult};

/// In-memory storage backend over a locked map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.read().expect("store lock poisoned").len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of all stored keys, unordered.
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .read()
            .expect("store lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl ObjectStore for MemoryStore {
    async fn put(&self, key: &str, data: &[u8]) -> VasariResult<()> {
        self.objects
            .write()
            .expect("store lock poisoned")
            .insert(key.to_string(), data.to_vec());
        tracing::debug!(key, size = data.len(), "Stored object in memory");
        Ok(())
    }

    async fn get(&self, key: &str) -> VasariResult<Vec<u8>> {
        self.objects
            .read()
            .expect("store lock poisoned")
            .get(key)
            .cloned()
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound(key.to_string())).into()
            })
    }

    async fn delete(&self, key: &str) -> VasariResult<()> {
        self.objects
            .write()
            .expect("store lock poisoned")
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| {
                StorageError::new(StorageErrorKind::NotFound(key.to_string())).into()
            })
    }

    async fn exists(&self, key: &str) -> VasariResult<bool> {
        Ok(self
            .objects
            .read()
            .expect("store lock poisoned")
            .contains_key(key))
    }
}
