//! Upload validation error types.

/// Kinds of validation failures for uploaded image bytes.
///
/// Validation errors are terminal: the payload is rejected before any
/// storage or repository side effects occur.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ValidationErrorKind {
    /// Payload exceeds the configured byte limit
    #[display("Payload too large: {} bytes exceeds limit of {}", size, limit)]
    TooLarge {
        /// Actual payload size in bytes
        size: usize,
        /// Configured maximum in bytes
        limit: usize,
    },
    /// Bytes could not be decoded as a raster image
    #[display("Undecodable image data: {}", _0)]
    Undecodable(String),
    /// Decoded format is not on the allow-list
    #[display("Unsupported image format: {}", _0)]
    UnsupportedFormat(String),
    /// Decoded dimensions fall outside the configured bounds
    #[display(
        "Image dimensions {}x{} outside allowed range [{}, {}]",
        width, height, min, max
    )]
    DimensionOutOfRange {
        /// Decoded width in pixels
        width: u32,
        /// Decoded height in pixels
        height: u32,
        /// Minimum allowed dimension
        min: u32,
        /// Maximum allowed dimension
        max: u32,
    },
}

/// Validation error with location tracking.
///
/// # Examples
///
/// ```
/// use vasari_error::{ValidationError, ValidationErrorKind};
///
/// let err = ValidationError::new(ValidationErrorKind::TooLarge { size: 7_000_000, limit: 5_242_880 });
/// assert!(format!("{}", err).contains("too large"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Validation Error: {} at line {} in {}", kind, line, file)]
pub struct ValidationError {
    /// The kind of error that occurred
    pub kind: ValidationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ValidationError {
    /// Create a new validation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ValidationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
