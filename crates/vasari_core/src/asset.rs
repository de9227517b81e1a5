//! The persisted asset record.

use crate::ImageFormat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// One stored image bound to a parent entity.
///
/// The asset repository exclusively owns the persisted record; orchestration
/// code treats assets as values and routes every mutation through the
/// repository so the per-parent invariants hold at each committed state.
///
/// Invariant: at most one asset with `is_primary == true` per `parent_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Unique identifier, assigned at creation, immutable
    pub id: Uuid,
    /// Identifier of the owning entity; many assets per parent
    pub parent_id: Uuid,
    /// Storage key of the source bytes
    pub original_key: String,
    /// Rendition name ("thumbnail", "medium") to storage key
    pub rendition_keys: BTreeMap<String, String>,
    /// SHA-256 hex digest of the original bytes
    pub content_hash: String,
    /// Decoded width of the original in pixels
    pub width: u32,
    /// Decoded height of the original in pixels
    pub height: u32,
    /// Decoded source format
    pub format: ImageFormat,
    /// Original payload length in bytes
    pub size_bytes: u64,
    /// Alternative text for accessibility
    pub alt_text: Option<String>,
    /// Display caption
    pub caption: Option<String>,
    /// Whether this asset is the parent's representative image
    pub is_primary: bool,
    /// Display sequence within the parent; stable sort key, not contiguous
    pub order: u32,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
}

impl Asset {
    /// All storage keys owned by this asset: the original plus every rendition.
    ///
    /// Deletion walks this list; once the record is gone these keys are
    /// unreferenced and must be removed from storage.
    pub fn storage_keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(1 + self.rendition_keys.len());
        keys.push(self.original_key.clone());
        keys.extend(self.rendition_keys.values().cloned());
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Asset {
        let mut rendition_keys = BTreeMap::new();
        rendition_keys.insert(
            "thumbnail".to_string(),
            "renditions/2026/08/07/thumb.jpg".to_string(),
        );
        rendition_keys.insert(
            "medium".to_string(),
            "renditions/2026/08/07/medium.jpg".to_string(),
        );
        Asset {
            id: Uuid::new_v4(),
            parent_id: Uuid::new_v4(),
            original_key: "originals/2026/08/07/original.png".to_string(),
            rendition_keys,
            content_hash: "deadbeef".to_string(),
            width: 1024,
            height: 768,
            format: ImageFormat::Png,
            size_bytes: 2048,
            alt_text: None,
            caption: None,
            is_primary: false,
            order: 0,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn storage_keys_cover_original_and_renditions() {
        let asset = sample();
        let keys = asset.storage_keys();
        assert_eq!(keys.len(), 3);
        assert!(keys.contains(&asset.original_key));
        for key in asset.rendition_keys.values() {
            assert!(keys.contains(key));
        }
    }

    #[test]
    fn serializes_to_json_and_back() {
        let asset = sample();
        let json = serde_json::to_string(&asset).unwrap();
        let back: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, asset);
    }
}
