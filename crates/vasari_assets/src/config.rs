//! Service configuration types and loading.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use vasari_core::RenditionSpec;
use vasari_error::{ConfigError, VasariResult};
use vasari_media::ValidatorConfig;

/// Bulk ingestion limits.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct IngestConfig {
    /// Maximum items per batch; larger batches are rejected before any work
    #[serde(default = "default_max_batch_size")]
    max_batch_size: usize,

    /// Items processed concurrently within a batch
    #[serde(default = "default_max_concurrency")]
    max_concurrency: usize,
}

fn default_max_batch_size() -> usize {
    10
}

fn default_max_concurrency() -> usize {
    4
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

/// Top-level configuration for the asset service.
///
/// Every section has working defaults, so `AssetServiceConfig::default()`
/// is a complete configuration and a TOML file only needs to name what it
/// overrides.
///
/// # Example
///
/// ```
/// use vasari_assets::AssetServiceConfig;
///
/// let config: AssetServiceConfig = toml::from_str(r#"
///     [ingest]
///     max_batch_size = 25
///
///     [[renditions]]
///     name = "thumbnail"
///     max_width = 160
///     max_height = 160
///     quality = 75
/// "#).unwrap();
/// assert_eq!(*config.ingest().max_batch_size(), 25);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct AssetServiceConfig {
    /// Upload validation limits
    #[serde(default)]
    validator: ValidatorConfig,

    /// Rendition set generated for every asset
    #[serde(default = "RenditionSpec::default_set")]
    renditions: Vec<RenditionSpec>,

    /// Bulk ingestion limits
    #[serde(default)]
    ingest: IngestConfig,
}

impl Default for AssetServiceConfig {
    fn default() -> Self {
        Self {
            validator: ValidatorConfig::default(),
            renditions: RenditionSpec::default_set(),
            ingest: IngestConfig::default(),
        }
    }
}

impl AssetServiceConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> VasariResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::new(format!("{}: {}", path.display(), e)))?;
        let config = toml::from_str(&text)
            .map_err(|e| ConfigError::new(format!("{}: {}", path.display(), e)))?;
        Ok(config)
    }
}
