//! Shared fixtures for asset orchestration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::io::Cursor;
use std::sync::{Arc, Mutex};

use image::{DynamicImage, RgbImage};
use vasari_assets::{AssetManager, AssetRepository, AssetServiceConfig, MemoryAssetRepository};
use vasari_core::Asset;
use vasari_error::{
    RepositoryError, RepositoryErrorKind, StorageError, StorageErrorKind, VasariResult,
};
use vasari_storage::{MemoryStore, ObjectStore};

/// Encode a flat-color PNG of the given dimensions.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
        width,
        height,
        image::Rgb([40, 90, 160]),
    ));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
        .unwrap();
    buffer
}

/// Manager wired to in-memory collaborators, all individually reachable.
pub struct Fixture {
    pub store: Arc<MemoryStore>,
    pub repository: Arc<MemoryAssetRepository>,
    pub manager: Arc<AssetManager>,
}

pub fn fixture() -> Fixture {
    let store = Arc::new(MemoryStore::new());
    let repository = Arc::new(MemoryAssetRepository::new());
    let manager = Arc::new(AssetManager::new(
        store.clone(),
        repository.clone(),
        &AssetServiceConfig::default(),
    ));
    Fixture {
        store,
        repository,
        manager,
    }
}

/// Object store whose deletes fail for marked keys.
#[derive(Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    failing_deletes: Mutex<HashSet<String>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every future delete of `key` fail.
    pub fn fail_deletes_for(&self, key: &str) {
        self.failing_deletes
            .lock()
            .unwrap()
            .insert(key.to_string());
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }
}

#[async_trait::async_trait]
impl ObjectStore for FlakyStore {
    async fn put(&self, key: &str, data: &[u8]) -> VasariResult<()> {
        self.inner.put(key, data).await
    }

    async fn get(&self, key: &str) -> VasariResult<Vec<u8>> {
        self.inner.get(key).await
    }

    async fn delete(&self, key: &str) -> VasariResult<()> {
        if self.failing_deletes.lock().unwrap().contains(key) {
            return Err(StorageError::new(StorageErrorKind::DeleteFailed(format!(
                "injected failure for {key}"
            )))
            .into());
        }
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> VasariResult<bool> {
        self.inner.exists(key).await
    }
}

/// Repository whose inserts always fail, for create-rollback tests.
#[derive(Default)]
pub struct RejectingRepository {
    inner: MemoryAssetRepository,
}

impl RejectingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl AssetRepository for RejectingRepository {
    async fn insert(&self, _asset: Asset) -> VasariResult<Asset> {
        Err(RepositoryError::new(RepositoryErrorKind::Transaction(
            "injected commit failure".to_string(),
        ))
        .into())
    }

    async fn get(&self, asset_id: uuid::Uuid) -> VasariResult<Asset> {
        self.inner.get(asset_id).await
    }

    async fn update_fields(
        &self,
        asset_id: uuid::Uuid,
        patch: vasari_core::AssetPatch,
    ) -> VasariResult<Asset> {
        self.inner.update_fields(asset_id, patch).await
    }

    async fn set_primary_exclusive(
        &self,
        parent_id: uuid::Uuid,
        asset_id: uuid::Uuid,
    ) -> VasariResult<Asset> {
        self.inner.set_primary_exclusive(parent_id, asset_id).await
    }

    async fn reorder(
        &self,
        parent_id: uuid::Uuid,
        ordered_ids: &[uuid::Uuid],
    ) -> VasariResult<Vec<Asset>> {
        self.inner.reorder(parent_id, ordered_ids).await
    }

    async fn delete(&self, asset_id: uuid::Uuid) -> VasariResult<Asset> {
        self.inner.delete(asset_id).await
    }

    async fn list_for_parent(&self, parent_id: uuid::Uuid) -> VasariResult<Vec<Asset>> {
        self.inner.list_for_parent(parent_id).await
    }

    async fn get_primary(&self, parent_id: uuid::Uuid) -> VasariResult<Asset> {
        self.inner.get_primary(parent_id).await
    }
}
