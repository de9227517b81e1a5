//! Single-asset lifecycle orchestration.

use crate::{AssetRepository, AssetServiceConfig};
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use uuid::Uuid;
use vasari_core::{Asset, AssetMetadata, AssetPatch, RenditionSpec};
use vasari_error::{RenditionError, RenditionErrorKind, VasariError, VasariResult};
use vasari_media::{RenditionGenerator, Validator};
use vasari_storage::{keys, ObjectStore};

/// Storage key category for original uploads.
const ORIGINALS_CATEGORY: &str = "originals";

/// Storage key category for generated renditions.
const RENDITIONS_CATEGORY: &str = "renditions";

/// Orchestrates the lifecycle of a single asset.
///
/// Owns the transition logic between upload bytes, stored objects, and the
/// committed metadata record. Within one `create` call an asset moves
/// through `Pending` (validated, objects being written) to `Stored`
/// (objects durable) to `Active` (record committed). `Pending` and
/// `Stored` are never externally observable: a failure at any point
/// deletes every object written so far and surfaces the error.
///
/// Deletion is the mirror image with the opposite failure policy: the
/// repository record is removed first and is authoritative, storage
/// cleanup is best-effort.
pub struct AssetManager {
    store: Arc<dyn ObjectStore>,
    repository: Arc<dyn AssetRepository>,
    validator: Validator,
    generator: RenditionGenerator,
    specs: Vec<RenditionSpec>,
}

impl AssetManager {
    /// Create a manager over the given collaborators.
    pub fn new(
        store: Arc<dyn ObjectStore>,
        repository: Arc<dyn AssetRepository>,
        config: &AssetServiceConfig,
    ) -> Self {
        Self {
            store,
            repository,
            validator: Validator::new(config.validator().clone()),
            generator: RenditionGenerator::new(),
            specs: config.renditions().clone(),
        }
    }

    /// The repository this manager commits metadata through.
    pub fn repository(&self) -> &Arc<dyn AssetRepository> {
        &self.repository
    }

    /// Validate, store, and commit one uploaded image.
    ///
    /// Pipeline: validate the payload, write the original, generate the
    /// rendition set on the blocking pool, write each rendition, then
    /// commit the record. Validation failures happen before any write. Any
    /// later failure rolls back every object written for this call, so
    /// storage never holds orphans from a failed create.
    ///
    /// When `metadata.order` is `None` the asset is appended after the
    /// parent's current maximum order.
    #[tracing::instrument(skip(self, bytes, metadata), fields(parent_id = %parent_id, size = bytes.len()))]
    pub async fn create(
        &self,
        parent_id: Uuid,
        bytes: Vec<u8>,
        metadata: AssetMetadata,
    ) -> VasariResult<Asset> {
        let info = self.validator.validate(&bytes)?;
        let content_hash = format!("{:x}", Sha256::digest(&bytes));
        let size_bytes = bytes.len() as u64;

        let payload: Arc<[u8]> = bytes.into();
        let mut written: Vec<String> = Vec::with_capacity(1 + self.specs.len());

        let original_key = keys::generate(ORIGINALS_CATEGORY, info.format.extension());
        self.store.put(&original_key, &payload).await?;
        written.push(original_key.clone());

        // Resampling is CPU-bound; run it off the async pool so concurrent
        // uploads do not serialize on it.
        let generator = self.generator;
        let specs = self.specs.clone();
        let generation_input = Arc::clone(&payload);
        let generated = tokio::task::spawn_blocking(move || {
            generator.generate(&generation_input, &specs)
        })
        .await
        .map_err(|e| {
            VasariError::from(RenditionError::new(RenditionErrorKind::Worker(
                e.to_string(),
            )))
        })
        .and_then(|result| result);

        let renditions = match generated {
            Ok(renditions) => renditions,
            Err(e) => {
                self.rollback_storage(&written).await;
                return Err(e);
            }
        };

        let mut rendition_keys = std::collections::BTreeMap::new();
        for (name, data) in &renditions {
            let key = keys::generate(RENDITIONS_CATEGORY, "jpg");
            if let Err(e) = self.store.put(&key, data).await {
                self.rollback_storage(&written).await;
                return Err(e);
            }
            written.push(key.clone());
            rendition_keys.insert(name.clone(), key);
        }

        let order = match metadata.order {
            Some(order) => order,
            None => self.next_order(parent_id).await?,
        };

        let asset = Asset {
            id: Uuid::new_v4(),
            parent_id,
            original_key: original_key.clone(),
            rendition_keys,
            content_hash,
            width: info.width,
            height: info.height,
            format: info.format,
            size_bytes,
            alt_text: metadata.alt_text,
            caption: metadata.caption,
            is_primary: false,
            order,
            created_at: Utc::now(),
        };

        match self.repository.insert(asset).await {
            Ok(committed) => {
                tracing::info!(
                    asset_id = %committed.id,
                    original_key = %committed.original_key,
                    renditions = committed.rendition_keys.len(),
                    "Created asset"
                );
                Ok(committed)
            }
            Err(e) => {
                // Commit failed after the objects landed; reverse the writes
                // so nothing unreferenced survives this call.
                self.rollback_storage(&written).await;
                Err(e)
            }
        }
    }

    /// Make one asset the parent's sole primary.
    ///
    /// Delegates to the repository's atomic unset-then-set update; see
    /// [`AssetRepository::set_primary_exclusive`].
    #[tracing::instrument(skip(self), fields(parent_id = %parent_id, asset_id = %asset_id))]
    pub async fn set_primary(&self, parent_id: Uuid, asset_id: Uuid) -> VasariResult<Asset> {
        let asset = self
            .repository
            .set_primary_exclusive(parent_id, asset_id)
            .await?;
        tracing::info!(asset_id = %asset.id, "Set primary asset");
        Ok(asset)
    }

    /// Update descriptive fields on one asset.
    ///
    /// Only `alt_text`, `caption`, and `order` are touched; storage keys
    /// and derived attributes never change through this path.
    pub async fn update_metadata(&self, asset_id: Uuid, patch: AssetPatch) -> VasariResult<Asset> {
        self.repository.update_fields(asset_id, patch).await
    }

    /// Reassign display order across a parent's assets.
    pub async fn reorder(&self, parent_id: Uuid, ordered_ids: &[Uuid]) -> VasariResult<Vec<Asset>> {
        self.repository.reorder(parent_id, ordered_ids).await
    }

    /// Delete one asset: record first, then best-effort storage cleanup.
    ///
    /// Metadata removal is the authoritative delete signal. Storage
    /// failures are logged and swallowed; a half-cleaned object store is
    /// preferable to a delete that appears to fail after the record is
    /// already gone.
    #[tracing::instrument(skip(self), fields(asset_id = %asset_id))]
    pub async fn delete(&self, asset_id: Uuid) -> VasariResult<()> {
        let removed = self.repository.delete(asset_id).await?;
        let failures = self.delete_storage_objects(&removed).await;
        tracing::info!(
            asset_id = %asset_id,
            storage_failures = failures.len(),
            "Deleted asset"
        );
        Ok(())
    }

    /// Delete every asset of a parent, collecting per-asset failures.
    ///
    /// The loop never aborts: all metadata records are removed regardless,
    /// and the returned list carries whatever storage cleanup failed.
    #[tracing::instrument(skip(self), fields(parent_id = %parent_id))]
    pub async fn delete_all_for_parent(&self, parent_id: Uuid) -> VasariResult<Vec<VasariError>> {
        let assets = self.repository.list_for_parent(parent_id).await?;
        let total = assets.len();
        let mut failures = Vec::new();

        for asset in assets {
            match self.repository.delete(asset.id).await {
                Ok(removed) => {
                    failures.extend(self.delete_storage_objects(&removed).await);
                }
                Err(e) => failures.push(e),
            }
        }

        tracing::info!(
            parent_id = %parent_id,
            deleted = total,
            failures = failures.len(),
            "Deleted all assets for parent"
        );
        Ok(failures)
    }

    /// All assets of a parent, ordered by `(order, created_at)`.
    pub async fn list_for_parent(&self, parent_id: Uuid) -> VasariResult<Vec<Asset>> {
        self.repository.list_for_parent(parent_id).await
    }

    /// The parent's primary asset, if one is set.
    pub async fn get_primary(&self, parent_id: Uuid) -> VasariResult<Asset> {
        self.repository.get_primary(parent_id).await
    }

    /// Fetch one asset by id.
    pub async fn get(&self, asset_id: Uuid) -> VasariResult<Asset> {
        self.repository.get(asset_id).await
    }

    /// Next append position for a parent: current maximum order plus one.
    async fn next_order(&self, parent_id: Uuid) -> VasariResult<u32> {
        let assets = self.repository.list_for_parent(parent_id).await?;
        Ok(assets
            .iter()
            .map(|asset| asset.order)
            .max()
            .map_or(0, |max| max + 1))
    }

    /// Best-effort removal of every object a removed record referenced.
    async fn delete_storage_objects(&self, asset: &Asset) -> Vec<VasariError> {
        let mut failures = Vec::new();
        for key in asset.storage_keys() {
            if let Err(e) = self.store.delete(&key).await {
                tracing::warn!(
                    asset_id = %asset.id,
                    key = %key,
                    error = %e,
                    "Failed to delete storage object, continuing"
                );
                failures.push(e);
            }
        }
        failures
    }

    /// Reverse writes from a failed create, best-effort.
    async fn rollback_storage(&self, written: &[String]) {
        for key in written {
            if let Err(e) = self.store.delete(key).await {
                tracing::warn!(key = %key, error = %e, "Failed to roll back storage object");
            }
        }
    }
}

impl std::fmt::Debug for AssetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetManager")
            .field("specs", &self.specs)
            .finish_non_exhaustive()
    }
}
