//! Asset lifecycle orchestration for the Vasari asset pipeline.
//!
//! This crate ties the pipeline together: uploads flow through validation
//! and rendition generation into a pluggable object store, with metadata
//! committed through the [`AssetRepository`] seam. The orchestrators enforce
//! the per-parent invariants (at most one primary asset, stable display
//! order) and the asymmetric failure policy: strict compensating rollback
//! on create, best-effort storage cleanup on delete.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use vasari_assets::{AssetManager, AssetServiceConfig, MemoryAssetRepository};
//! use vasari_core::AssetMetadata;
//! use vasari_storage::MemoryStore;
//!
//! # async fn example(upload: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let manager = AssetManager::new(
//!     Arc::new(MemoryStore::new()),
//!     Arc::new(MemoryAssetRepository::new()),
//!     &AssetServiceConfig::default(),
//! );
//!
//! let parent_id = Uuid::new_v4();
//! let asset = manager
//!     .create(parent_id, upload, AssetMetadata::default())
//!     .await?;
//! manager.set_primary(parent_id, asset.id).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bulk;
mod config;
mod manager;
mod memory;
mod repository;

pub use bulk::{BulkIngestionCoordinator, BulkReport, ItemFailure};
pub use config::{AssetServiceConfig, IngestConfig};
pub use manager::AssetManager;
pub use memory::MemoryAssetRepository;
pub use repository::AssetRepository;
