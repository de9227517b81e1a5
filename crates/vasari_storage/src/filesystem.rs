//! Filesystem-based object store implementation.
//!
//! Maps storage keys directly to paths under a base directory. Key
//! generation already date-partitions (`{category}/{YYYY}/{MM}/{DD}/...`),
//! so no one directory grows unbounded.

use crate::ObjectStore;
use std::path::PathBuf;
use vasari_error::{StorageError, StorageErrorKind, VasariResult};

/// Filesystem storage backend.
///
/// Stores each object at `{base_path}/{key}`, creating intermediate
/// directories on demand.
///
/// # Example Structure
///
/// ```text
/// /var/vasari/media/
/// ├── originals/
/// │   └── 2026/
/// │       └── 08/
/// │           └── 07/
/// │               └── 3f2a...c1.png
/// └── renditions/
///     └── 2026/
///         └── 08/
///             └── 07/
///                 ├── 9b41...77.jpg
///                 └── d03e...a2.jpg
/// ```
///
/// # Features
///
/// - **Atomic writes**: Uses temp file + rename for atomicity
/// - **Key hygiene**: Rejects keys that would escape the base directory
pub struct FileSystemStore {
    base_path: PathBuf,
}

impl FileSystemStore {
    /// Create a new filesystem store.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Root directory for object storage
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> VasariResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem store");
        Ok(Self { base_path })
    }

    /// Resolve a key to a path under the base directory.
    ///
    /// Every `/`-separated segment must be a plain name: empty segments,
    /// `.`/`..`, and path separators inside a segment are rejected so a key
    /// can never address anything outside the base directory.
    fn resolve(&self, key: &str) -> VasariResult<PathBuf> {
        if key.is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidKey(
                "empty key".to_string(),
            ))
            .into());
        }

        let mut path = self.base_path.clone();
        for segment in key.split('/') {
            if segment.is_empty()
                || segment == "."
                || segment == ".."
                || segment.contains('\\')
            {
                return Err(StorageError::new(StorageErrorKind::InvalidKey(
                    key.to_string(),
                ))
                .into());
            }
            path.push(segment);
        }
        Ok(path)
    }
}

#[async_trait::async_trait]
impl ObjectStore for FileSystemStore {
    #[tracing::instrument(skip(self, data), fields(size = data.len()))]
    async fn put(&self, key: &str, data: &[u8]) -> VasariResult<()> {
        let path = self.resolve(key)?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            StorageError::new(StorageErrorKind::WriteFailed(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::WriteFailed(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::info!(key, path = %path.display(), size = data.len(), "Stored object");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn get(&self, key: &str) -> VasariResult<Vec<u8>> {
        let path = self.resolve(key)?;

        let data = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(key.to_string()))
            } else {
                StorageError::new(StorageErrorKind::ReadFailed(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::debug!(key, size = data.len(), "Retrieved object");

        Ok(data)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, key: &str) -> VasariResult<()> {
        let path = self.resolve(key)?;

        tokio::fs::remove_file(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(key.to_string()))
            } else {
                StorageError::new(StorageErrorKind::DeleteFailed(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        tracing::info!(key, path = %path.display(), "Deleted object");

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn exists(&self, key: &str) -> VasariResult<bool> {
        let path = self.resolve(key)?;
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }
}

impl std::fmt::Debug for FileSystemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSystemStore")
            .field("base_path", &self.base_path)
            .finish()
    }
}
