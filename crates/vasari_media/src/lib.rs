//! Image validation and rendition generation for the Vasari asset pipeline.
//!
//! Both components are pure transforms over byte slices: no storage, no
//! repository, no network. The orchestration layer decides where they run;
//! rendition generation is CPU-bound and belongs on a blocking worker.
//!
//! # Example
//!
//! ```rust
//! use vasari_core::RenditionSpec;
//! use vasari_media::{RenditionGenerator, Validator, ValidatorConfig};
//!
//! # fn example(upload: &[u8]) -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new(ValidatorConfig::default());
//! let info = validator.validate(upload)?;
//! println!("{}x{} {}", info.width, info.height, info.format);
//!
//! let generator = RenditionGenerator::new();
//! let renditions = generator.generate(upload, &RenditionSpec::default_set())?;
//! assert!(renditions.contains_key("thumbnail"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod rendition;
mod validator;

pub use rendition::RenditionGenerator;
pub use validator::{ImageInfo, Validator, ValidatorConfig, ValidatorConfigBuilder};
