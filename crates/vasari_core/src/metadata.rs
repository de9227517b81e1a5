//! Metadata inputs for asset creation and patching.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Caller-supplied metadata accompanying an upload.
///
/// # Examples
///
/// ```
/// use vasari_core::AssetMetadataBuilder;
///
/// let metadata = AssetMetadataBuilder::default()
///     .alt_text(Some("Harbor at dusk".to_string()))
///     .build()
///     .unwrap();
/// assert!(metadata.order.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(default)]
pub struct AssetMetadata {
    /// Alternative text for accessibility
    pub alt_text: Option<String>,
    /// Display caption
    pub caption: Option<String>,
    /// Explicit display order; appended after the parent's current maximum
    /// when absent
    pub order: Option<u32>,
}

/// Partial update for mutable descriptive fields.
///
/// Only `alt_text`, `caption`, and `order` are patchable; storage keys,
/// dimensions, the content hash, and the primary flag never change through
/// a patch. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[builder(default)]
pub struct AssetPatch {
    /// Replacement alternative text
    pub alt_text: Option<String>,
    /// Replacement caption
    pub caption: Option<String>,
    /// Replacement display order
    pub order: Option<u32>,
}

impl AssetPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.alt_text.is_none() && self.caption.is_none() && self.order.is_none()
    }
}
