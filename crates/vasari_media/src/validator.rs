//! Upload validation: size, decodability, format, and dimension bounds.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use vasari_core::ImageFormat;
use vasari_error::{ValidationError, ValidationErrorKind, VasariResult};

/// Validation limits for uploaded images.
#[derive(
    Debug,
    Clone,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
pub struct ValidatorConfig {
    /// Maximum payload size in bytes
    #[serde(default = "default_max_bytes")]
    #[builder(default = "default_max_bytes()")]
    max_bytes: usize,

    /// Minimum width/height in pixels
    #[serde(default = "default_min_dimension")]
    #[builder(default = "default_min_dimension()")]
    min_dimension: u32,

    /// Maximum width/height in pixels
    #[serde(default = "default_max_dimension")]
    #[builder(default = "default_max_dimension()")]
    max_dimension: u32,

    /// Accepted source formats
    #[serde(default = "default_allowed_formats")]
    #[builder(default = "default_allowed_formats()")]
    allowed_formats: Vec<ImageFormat>,
}

fn default_max_bytes() -> usize {
    5 * 1024 * 1024 // 5 MiB
}

fn default_min_dimension() -> u32 {
    200
}

fn default_max_dimension() -> u32 {
    5000
}

fn default_allowed_formats() -> Vec<ImageFormat> {
    vec![ImageFormat::Jpeg, ImageFormat::Png, ImageFormat::WebP]
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            min_dimension: default_min_dimension(),
            max_dimension: default_max_dimension(),
            allowed_formats: default_allowed_formats(),
        }
    }
}

/// What validation learned about an accepted payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    /// Decoded width in pixels
    pub width: u32,
    /// Decoded height in pixels
    pub height: u32,
    /// Detected source format
    pub format: ImageFormat,
}

/// Inspects raw upload bytes before any side effects occur.
///
/// Checks run cheapest-first: byte length, format detection, full decode,
/// dimension bounds. Pure inspection; the bytes are never modified.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: ValidatorConfig,
}

impl Validator {
    /// Create a validator with the given limits.
    pub fn new(config: ValidatorConfig) -> Self {
        Self { config }
    }

    /// Validate an uploaded payload.
    ///
    /// # Errors
    ///
    /// - `TooLarge` when the payload exceeds the byte limit
    /// - `Undecodable` when the bytes are not a decodable raster image
    /// - `UnsupportedFormat` when the format is off the allow-list
    /// - `DimensionOutOfRange` when a dimension falls outside the bounds
    pub fn validate(&self, bytes: &[u8]) -> VasariResult<ImageInfo> {
        if bytes.len() > self.config.max_bytes {
            return Err(ValidationError::new(ValidationErrorKind::TooLarge {
                size: bytes.len(),
                limit: self.config.max_bytes,
            })
            .into());
        }

        let detected = image::guess_format(bytes).map_err(|e| {
            ValidationError::new(ValidationErrorKind::Undecodable(e.to_string()))
        })?;

        let format = match detected {
            image::ImageFormat::Jpeg => ImageFormat::Jpeg,
            image::ImageFormat::Png => ImageFormat::Png,
            image::ImageFormat::WebP => ImageFormat::WebP,
            other => {
                return Err(ValidationError::new(ValidationErrorKind::UnsupportedFormat(
                    format!("{other:?}").to_lowercase(),
                ))
                .into());
            }
        };

        if !self.config.allowed_formats.contains(&format) {
            return Err(ValidationError::new(ValidationErrorKind::UnsupportedFormat(
                format.to_string(),
            ))
            .into());
        }

        let decoded = image::load_from_memory_with_format(bytes, detected).map_err(|e| {
            ValidationError::new(ValidationErrorKind::Undecodable(e.to_string()))
        })?;

        let (width, height) = (decoded.width(), decoded.height());
        let (min, max) = (self.config.min_dimension, self.config.max_dimension);
        if width < min || height < min || width > max || height > max {
            return Err(ValidationError::new(
                ValidationErrorKind::DimensionOutOfRange {
                    width,
                    height,
                    min,
                    max,
                },
            )
            .into());
        }

        tracing::debug!(width, height, format = %format, "Validated upload");

        Ok(ImageInfo {
            width,
            height,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};
    use std::io::Cursor;
    use vasari_error::VasariErrorKind;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            image::Rgb([120, 40, 200]),
        ));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn validation_kind(err: vasari_error::VasariError) -> ValidationErrorKind {
        match err.kind() {
            VasariErrorKind::Validation(e) => e.kind.clone(),
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn accepts_png_within_bounds() {
        let validator = Validator::default();
        let info = validator.validate(&png_bytes(800, 600)).unwrap();
        assert_eq!(info.width, 800);
        assert_eq!(info.height, 600);
        assert_eq!(info.format, ImageFormat::Png);
    }

    #[test]
    fn rejects_oversized_payload_before_decoding() {
        let validator = Validator::default();
        let oversized = vec![0u8; 6 * 1024 * 1024];
        let kind = validation_kind(validator.validate(&oversized).unwrap_err());
        assert!(matches!(kind, ValidationErrorKind::TooLarge { .. }));
    }

    #[test]
    fn rejects_garbage_bytes() {
        let validator = Validator::default();
        let kind = validation_kind(validator.validate(b"definitely not an image").unwrap_err());
        assert!(matches!(kind, ValidationErrorKind::Undecodable(_)));
    }

    #[test]
    fn rejects_format_off_the_allow_list() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(300, 300, image::Rgb([0, 0, 0])));
        let mut bmp = Vec::new();
        img.write_to(&mut Cursor::new(&mut bmp), image::ImageFormat::Bmp)
            .unwrap();

        let validator = Validator::default();
        let kind = validation_kind(validator.validate(&bmp).unwrap_err());
        assert!(matches!(kind, ValidationErrorKind::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_dimensions_below_minimum() {
        let validator = Validator::default();
        let kind = validation_kind(validator.validate(&png_bytes(100, 400)).unwrap_err());
        assert!(matches!(
            kind,
            ValidationErrorKind::DimensionOutOfRange { width: 100, .. }
        ));
    }

    #[test]
    fn rejects_dimensions_above_maximum() {
        let config = ValidatorConfigBuilder::default()
            .max_dimension(500u32)
            .build()
            .unwrap();
        let validator = Validator::new(config);
        let kind = validation_kind(validator.validate(&png_bytes(600, 300)).unwrap_err());
        assert!(matches!(
            kind,
            ValidationErrorKind::DimensionOutOfRange { width: 600, .. }
        ));
    }

    #[test]
    fn config_defaults_apply_from_empty_toml() {
        let config: ValidatorConfig = toml::from_str("").unwrap();
        assert_eq!(*config.max_bytes(), 5 * 1024 * 1024);
        assert_eq!(*config.min_dimension(), 200);
        assert_eq!(*config.max_dimension(), 5000);
        assert_eq!(config.allowed_formats().len(), 3);
    }
}
