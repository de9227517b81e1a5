//! Deterministic rendition generation.
//!
//! A rendition is a derived, resized copy of an original image. Generation
//! is all-or-nothing across the rendition set for one asset: either every
//! spec produces bytes or the whole call fails.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};
use std::collections::BTreeMap;
use std::io::Cursor;
use vasari_core::RenditionSpec;
use vasari_error::{RenditionError, RenditionErrorKind, VasariResult};

/// Produces derived images from a validated original.
///
/// Deterministic for a given generator version: one decode, Lanczos3
/// resampling to the fitted dimensions, alpha flattened onto white, JPEG
/// encoding at the spec's quality. Identical input bytes and specs always
/// produce identical output bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenditionGenerator;

impl RenditionGenerator {
    /// Create a generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate every rendition in `specs` from `original`.
    ///
    /// Scaling is longest-side-fit: the output fits within the spec's
    /// bounds preserving aspect ratio, and meets at least one bound unless
    /// the original is already smaller (originals are never upscaled).
    ///
    /// # Errors
    ///
    /// Fails with a rendition error if the original cannot be decoded or
    /// any spec fails to encode; no partial result is returned.
    #[tracing::instrument(skip(self, original), fields(size = original.len(), specs = specs.len()))]
    pub fn generate(
        &self,
        original: &[u8],
        specs: &[RenditionSpec],
    ) -> VasariResult<BTreeMap<String, Vec<u8>>> {
        let decoded = image::load_from_memory(original).map_err(|e| {
            RenditionError::new(RenditionErrorKind::Decode(e.to_string()))
        })?;

        let mut renditions = BTreeMap::new();
        for spec in specs {
            let bytes = self.render_one(&decoded, spec)?;
            tracing::debug!(
                name = %spec.name,
                size = bytes.len(),
                "Generated rendition"
            );
            renditions.insert(spec.name.clone(), bytes);
        }
        Ok(renditions)
    }

    fn render_one(&self, decoded: &DynamicImage, spec: &RenditionSpec) -> VasariResult<Vec<u8>> {
        let (target_width, target_height) = fit_within(
            decoded.width(),
            decoded.height(),
            spec.max_width,
            spec.max_height,
        );

        let resized = if (target_width, target_height) == (decoded.width(), decoded.height()) {
            decoded.clone()
        } else {
            decoded.resize_exact(target_width, target_height, FilterType::Lanczos3)
        };

        let flattened = flatten_onto_white(&resized);

        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(Cursor::new(&mut buffer), spec.quality);
        flattened.write_with_encoder(encoder).map_err(|e| {
            RenditionError::new(RenditionErrorKind::Encode {
                name: spec.name.clone(),
                detail: e.to_string(),
            })
        })?;
        Ok(buffer)
    }
}

/// Fit `width x height` inside `max_width x max_height` preserving aspect
/// ratio. Returns the source dimensions unchanged when they already fit;
/// otherwise the limiting side meets its bound exactly.
fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width <= max_width && height <= max_height {
        return (width, height);
    }

    let width_ratio = f64::from(max_width) / f64::from(width);
    let height_ratio = f64::from(max_height) / f64::from(height);

    if width_ratio <= height_ratio {
        let fitted = (f64::from(height) * width_ratio).round().max(1.0) as u32;
        (max_width, fitted.min(max_height))
    } else {
        let fitted = (f64::from(width) * height_ratio).round().max(1.0) as u32;
        (fitted.min(max_width), max_height)
    }
}

/// Flatten any alpha channel onto an opaque white background.
///
/// JPEG has no transparency; compositing beats dropping the channel, which
/// would turn transparent regions black.
fn flatten_onto_white(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }

    let rgba = img.to_rgba8();
    let mut flattened = RgbImage::new(rgba.width(), rgba.height());
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let [r, g, b, a] = pixel.0;
        let alpha = f32::from(a) / 255.0;
        let blend = |channel: u8| -> u8 {
            (f32::from(channel) * alpha + 255.0 * (1.0 - alpha)).round() as u8
        };
        flattened.put_pixel(x, y, image::Rgb([blend(r), blend(g), blend(b)]));
    }
    flattened
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba, RgbaImage};
    use vasari_core::{MEDIUM_RENDITION, THUMBNAIL_RENDITION};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([10, 150, 90])));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn decode_dimensions(bytes: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory(bytes).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn thumbnail_fits_bounds_and_meets_one() {
        let generator = RenditionGenerator::new();
        let renditions = generator
            .generate(&png_bytes(1024, 768), &RenditionSpec::default_set())
            .unwrap();

        let (width, height) = decode_dimensions(&renditions[THUMBNAIL_RENDITION]);
        assert!(width <= 200 && height <= 200);
        assert!(width == 200 || height == 200);
        assert_eq!((width, height), (200, 150));

        let (width, height) = decode_dimensions(&renditions[MEDIUM_RENDITION]);
        assert_eq!((width, height), (800, 600));
    }

    #[test]
    fn portrait_orientation_limits_on_height() {
        let generator = RenditionGenerator::new();
        let renditions = generator
            .generate(
                &png_bytes(768, 1024),
                &[RenditionSpec::new("thumbnail", 200, 200, 80)],
            )
            .unwrap();
        assert_eq!(decode_dimensions(&renditions["thumbnail"]), (150, 200));
    }

    #[test]
    fn never_upscales_a_smaller_original() {
        let generator = RenditionGenerator::new();
        let renditions = generator
            .generate(
                &png_bytes(120, 80),
                &[RenditionSpec::new("medium", 800, 800, 85)],
            )
            .unwrap();
        assert_eq!(decode_dimensions(&renditions["medium"]), (120, 80));
    }

    #[test]
    fn generation_is_deterministic() {
        let generator = RenditionGenerator::new();
        let original = png_bytes(640, 480);
        let specs = RenditionSpec::default_set();

        let first = generator.generate(&original, &specs).unwrap();
        let second = generator.generate(&original, &specs).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn alpha_flattens_onto_white() {
        // Fully transparent image; flattening should yield white, not black.
        let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            300,
            300,
            Rgba([255, 0, 0, 0]),
        ));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();

        let generator = RenditionGenerator::new();
        let renditions = generator
            .generate(&buffer, &[RenditionSpec::new("thumbnail", 200, 200, 90)])
            .unwrap();

        let rendition = image::load_from_memory(&renditions["thumbnail"])
            .unwrap()
            .to_rgb8();
        let center = rendition.get_pixel(100, 100);
        for channel in center.0 {
            assert!(channel > 240, "expected near-white, got {:?}", center.0);
        }
    }

    #[test]
    fn undecodable_original_fails_whole_set() {
        let generator = RenditionGenerator::new();
        let err = generator
            .generate(b"garbage", &RenditionSpec::default_set())
            .unwrap_err();
        assert!(matches!(
            err.kind(),
            vasari_error::VasariErrorKind::Rendition(_)
        ));
    }

    #[test]
    fn fit_within_handles_extreme_aspect_ratios() {
        assert_eq!(fit_within(4000, 200, 200, 200), (200, 10));
        assert_eq!(fit_within(200, 4000, 200, 200), (10, 200));
        assert_eq!(fit_within(200, 200, 200, 200), (200, 200));
    }
}
