//! Core data types for the Vasari asset pipeline.
//!
//! This crate provides the foundation data types used across all Vasari
//! crates: the persisted [`Asset`] record, image format and rendition
//! vocabulary, and metadata inputs for creation and patching.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod format;
mod metadata;
mod rendition;
mod telemetry;

pub use asset::Asset;
pub use format::ImageFormat;
pub use metadata::{AssetMetadata, AssetMetadataBuilder, AssetPatch, AssetPatchBuilder};
pub use rendition::{RenditionSpec, MEDIUM_RENDITION, THUMBNAIL_RENDITION};
pub use telemetry::init_telemetry;
