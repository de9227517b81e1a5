//! Object store trait definition.

use vasari_error::VasariResult;

/// Trait for pluggable byte-object storage backends.
///
/// Implementations handle durable storage and retrieval of binary content,
/// while asset metadata is managed separately by the repository. Keys are
/// opaque strings supplied by the caller; implementations must never reuse
/// or rewrite them.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store bytes under a key.
    ///
    /// Writing an existing key replaces its content. The write must be
    /// atomic: readers never observe a partially written object.
    ///
    /// # Arguments
    ///
    /// * `key` - Opaque storage key
    /// * `data` - The bytes to store
    async fn put(&self, key: &str, data: &[u8]) -> VasariResult<()>;

    /// Retrieve bytes by key.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` storage error when no object exists at `key`.
    async fn get(&self, key: &str) -> VasariResult<Vec<u8>>;

    /// Delete the object at a key.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` storage error when no object exists at `key`.
    async fn delete(&self, key: &str) -> VasariResult<()>;

    /// Check whether an object exists at a key.
    async fn exists(&self, key: &str) -> VasariResult<bool>;
}
