//! Asset repository trait definition.

use uuid::Uuid;
use vasari_core::{Asset, AssetPatch};
use vasari_error::VasariResult;

/// Trait for transactional asset metadata stores.
///
/// Every method is one transaction: it either commits completely or leaves
/// the store unchanged. The repository is the sole mutator of the primary
/// flag, which carries the central invariant: at most one asset per parent
/// with `is_primary == true` at any committed state.
///
/// Implementations back this with whatever transaction mechanism their
/// store provides (row locks, compare-and-swap updates, a single state
/// lock); callers only rely on the atomicity contract.
#[async_trait::async_trait]
pub trait AssetRepository: Send + Sync {
    /// Insert a new asset record.
    ///
    /// # Errors
    ///
    /// Returns a `Conflict` repository error if the id already exists.
    async fn insert(&self, asset: Asset) -> VasariResult<Asset>;

    /// Fetch one asset by id.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` repository error if no record exists.
    async fn get(&self, asset_id: Uuid) -> VasariResult<Asset>;

    /// Apply a descriptive-field patch to an asset.
    ///
    /// Only `alt_text`, `caption`, and `order` may change; `None` fields
    /// are left untouched. Returns the updated record.
    async fn update_fields(&self, asset_id: Uuid, patch: AssetPatch) -> VasariResult<Asset>;

    /// Atomically make `asset_id` the sole primary asset of `parent_id`.
    ///
    /// Unsets `is_primary` on every other asset of the parent and sets it
    /// on the target inside one transaction, so no committed state ever
    /// holds two primaries. Operates only over already-committed assets.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` repository error if the asset does not exist or
    /// does not belong to the parent.
    async fn set_primary_exclusive(&self, parent_id: Uuid, asset_id: Uuid) -> VasariResult<Asset>;

    /// Atomically reassign display order for a parent's assets.
    ///
    /// `ordered_ids` must name every asset of the parent exactly once; each
    /// asset's `order` becomes its position in the list. Returns the assets
    /// in the new order.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if an id does not belong to the parent, or
    /// `Conflict` if the list misses assets or repeats an id.
    async fn reorder(&self, parent_id: Uuid, ordered_ids: &[Uuid]) -> VasariResult<Vec<Asset>>;

    /// Delete one asset record, returning the removed record.
    ///
    /// The returned record carries the storage keys the caller must now
    /// clean up; the bytes become unreferenced the moment this commits.
    async fn delete(&self, asset_id: Uuid) -> VasariResult<Asset>;

    /// All assets of a parent, ordered by `(order, created_at)`.
    ///
    /// An unknown parent is an empty collection, not an error.
    async fn list_for_parent(&self, parent_id: Uuid) -> VasariResult<Vec<Asset>>;

    /// The parent's primary asset.
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` repository error when no primary is set.
    async fn get_primary(&self, parent_id: Uuid) -> VasariResult<Asset>;
}
