//! Rendition specifications.

use serde::{Deserialize, Serialize};

/// Name of the thumbnail rendition.
pub const THUMBNAIL_RENDITION: &str = "thumbnail";

/// Name of the medium rendition.
pub const MEDIUM_RENDITION: &str = "medium";

/// A derived-image specification: a named bounding box plus encoder quality.
///
/// Renditions fit within `max_width x max_height` preserving aspect ratio;
/// the generator never upscales an original that already fits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenditionSpec {
    /// Rendition name, used as the key in `Asset::rendition_keys`
    pub name: String,
    /// Maximum output width in pixels
    pub max_width: u32,
    /// Maximum output height in pixels
    pub max_height: u32,
    /// Encoder quality, 1-100
    #[serde(default = "default_quality")]
    pub quality: u8,
}

fn default_quality() -> u8 {
    85
}

impl RenditionSpec {
    /// Create a spec with the given bounds and quality.
    pub fn new(name: impl Into<String>, max_width: u32, max_height: u32, quality: u8) -> Self {
        Self {
            name: name.into(),
            max_width,
            max_height,
            quality,
        }
    }

    /// The default thumbnail spec: 200x200 at quality 80.
    pub fn thumbnail() -> Self {
        Self::new(THUMBNAIL_RENDITION, 200, 200, 80)
    }

    /// The default medium spec: 800x800 at quality 85.
    pub fn medium() -> Self {
        Self::new(MEDIUM_RENDITION, 800, 800, 85)
    }

    /// The default rendition set generated for every asset.
    pub fn default_set() -> Vec<Self> {
        vec![Self::thumbnail(), Self::medium()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_thumbnail_and_medium() {
        let specs = RenditionSpec::default_set();
        let names: Vec<&str> = specs.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![THUMBNAIL_RENDITION, MEDIUM_RENDITION]);
    }

    #[test]
    fn quality_defaults_when_missing_from_toml() {
        let spec: RenditionSpec =
            toml::from_str("name = \"banner\"\nmax_width = 1200\nmax_height = 400\n").unwrap();
        assert_eq!(spec.quality, 85);
    }
}
