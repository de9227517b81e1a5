//! Pluggable byte-object storage for the Vasari asset pipeline.
//!
//! This crate provides the durable object store behind the asset manager.
//! Objects are addressed by opaque string keys generated with
//! [`keys::generate`]; the abstraction separates asset metadata (owned by
//! the repository) from content bytes (owned by a storage backend).
//!
//! # Features
//!
//! - **Pluggable backends**: Trait-based abstraction supports filesystem,
//!   in-memory, object stores, etc.
//! - **Atomic writes**: The filesystem backend writes via temp file + rename
//! - **Date-partitioned keys**: `{category}/{YYYY}/{MM}/{DD}/{uuid}.{ext}`
//!
//! # Example
//!
//! ```rust
//! use vasari_storage::{keys, FileSystemStore, ObjectStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileSystemStore::new("/tmp/vasari")?;
//! let key = keys::generate("originals", "png");
//!
//! let data = vec![0u8; 1024]; // PNG data
//! store.put(&key, &data).await?;
//!
//! let retrieved = store.get(&key).await?;
//! assert_eq!(data, retrieved);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
pub mod keys;
mod memory;
mod store;

pub use filesystem::FileSystemStore;
pub use memory::MemoryStore;
pub use store::ObjectStore;
