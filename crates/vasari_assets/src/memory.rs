//! In-memory asset repository implementation.
//!
//! Reference implementation of the repository contract. One mutex guards
//! the whole record map, so each trait method is trivially one transaction:
//! the unset-then-set primary swap and the reorder sweep commit under a
//! single lock acquisition, which is the entire mutual-exclusion story the
//! orchestration layer relies on.

use crate::AssetRepository;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;
use vasari_core::{Asset, AssetPatch};
use vasari_error::{RepositoryError, RepositoryErrorKind, VasariResult};

/// In-memory repository over a locked map.
#[derive(Debug, Default)]
pub struct MemoryAssetRepository {
    records: Mutex<HashMap<Uuid, Asset>>,
}

impl MemoryAssetRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().expect("repository lock poisoned").len()
    }

    /// Whether the repository holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Stable ordering for listings: `order`, then `created_at`, then id as a
/// final tiebreak so equal rows cannot flicker between calls.
fn sort_assets(assets: &mut [Asset]) {
    assets.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| a.created_at.cmp(&b.created_at))
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[async_trait::async_trait]
impl AssetRepository for MemoryAssetRepository {
    async fn insert(&self, asset: Asset) -> VasariResult<Asset> {
        let mut records = self.records.lock().expect("repository lock poisoned");
        if records.contains_key(&asset.id) {
            return Err(RepositoryError::new(RepositoryErrorKind::Conflict(format!(
                "asset {} already exists",
                asset.id
            )))
            .into());
        }
        records.insert(asset.id, asset.clone());
        tracing::debug!(asset_id = %asset.id, parent_id = %asset.parent_id, "Inserted asset record");
        Ok(asset)
    }

    async fn get(&self, asset_id: Uuid) -> VasariResult<Asset> {
        let records = self.records.lock().expect("repository lock poisoned");
        records
            .get(&asset_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("asset {asset_id}")).into())
    }

    async fn update_fields(&self, asset_id: Uuid, patch: AssetPatch) -> VasariResult<Asset> {
        let mut records = self.records.lock().expect("repository lock poisoned");
        let asset = records
            .get_mut(&asset_id)
            .ok_or_else(|| RepositoryError::not_found(format!("asset {asset_id}")))?;

        if let Some(alt_text) = patch.alt_text {
            asset.alt_text = Some(alt_text);
        }
        if let Some(caption) = patch.caption {
            asset.caption = Some(caption);
        }
        if let Some(order) = patch.order {
            asset.order = order;
        }
        Ok(asset.clone())
    }

    async fn set_primary_exclusive(&self, parent_id: Uuid, asset_id: Uuid) -> VasariResult<Asset> {
        let mut records = self.records.lock().expect("repository lock poisoned");

        let belongs = records
            .get(&asset_id)
            .is_some_and(|asset| asset.parent_id == parent_id);
        if !belongs {
            return Err(RepositoryError::not_found(format!(
                "asset {asset_id} under parent {parent_id}"
            ))
            .into());
        }

        // Unset-then-set under the same lock acquisition; no interleaving
        // call can observe two primaries.
        for asset in records.values_mut() {
            if asset.parent_id == parent_id {
                asset.is_primary = asset.id == asset_id;
            }
        }

        Ok(records[&asset_id].clone())
    }

    async fn reorder(&self, parent_id: Uuid, ordered_ids: &[Uuid]) -> VasariResult<Vec<Asset>> {
        let mut records = self.records.lock().expect("repository lock poisoned");

        let member_count = records
            .values()
            .filter(|asset| asset.parent_id == parent_id)
            .count();

        let mut seen = std::collections::HashSet::with_capacity(ordered_ids.len());
        for id in ordered_ids {
            if !seen.insert(*id) {
                return Err(RepositoryError::new(RepositoryErrorKind::Conflict(format!(
                    "asset {id} repeated in reorder"
                )))
                .into());
            }
            let belongs = records
                .get(id)
                .is_some_and(|asset| asset.parent_id == parent_id);
            if !belongs {
                return Err(RepositoryError::not_found(format!(
                    "asset {id} under parent {parent_id}"
                ))
                .into());
            }
        }
        if ordered_ids.len() != member_count {
            return Err(RepositoryError::new(RepositoryErrorKind::Conflict(format!(
                "reorder names {} of {} assets for parent {parent_id}",
                ordered_ids.len(),
                member_count
            )))
            .into());
        }

        let mut reordered = Vec::with_capacity(ordered_ids.len());
        for (position, id) in ordered_ids.iter().enumerate() {
            let asset = records.get_mut(id).expect("membership checked above");
            asset.order = position as u32;
            reordered.push(asset.clone());
        }
        Ok(reordered)
    }

    async fn delete(&self, asset_id: Uuid) -> VasariResult<Asset> {
        let mut records = self.records.lock().expect("repository lock poisoned");
        records
            .remove(&asset_id)
            .ok_or_else(|| RepositoryError::not_found(format!("asset {asset_id}")).into())
    }

    async fn list_for_parent(&self, parent_id: Uuid) -> VasariResult<Vec<Asset>> {
        let records = self.records.lock().expect("repository lock poisoned");
        let mut assets: Vec<Asset> = records
            .values()
            .filter(|asset| asset.parent_id == parent_id)
            .cloned()
            .collect();
        drop(records);
        sort_assets(&mut assets);
        Ok(assets)
    }

    async fn get_primary(&self, parent_id: Uuid) -> VasariResult<Asset> {
        let records = self.records.lock().expect("repository lock poisoned");
        records
            .values()
            .find(|asset| asset.parent_id == parent_id && asset.is_primary)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found(format!("primary asset for parent {parent_id}")).into()
            })
    }
}
