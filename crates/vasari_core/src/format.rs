//! Image format vocabulary.

use serde::{Deserialize, Serialize};

/// Raster formats accepted for uploaded originals.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use vasari_core::ImageFormat;
///
/// assert_eq!(ImageFormat::Jpeg.to_string(), "jpeg");
/// assert_eq!(ImageFormat::from_str("webp").unwrap(), ImageFormat::WebP);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageFormat {
    /// JPEG (baseline and progressive)
    Jpeg,
    /// PNG, including alpha
    Png,
    /// WebP (lossy and lossless)
    WebP,
}

impl ImageFormat {
    /// File extension used when building storage keys.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Png => "png",
            ImageFormat::WebP => "webp",
        }
    }

    /// MIME type for HTTP-facing callers.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::WebP => "image/webp",
        }
    }
}
