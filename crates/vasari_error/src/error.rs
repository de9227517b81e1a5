//! Top-level error wrapper types.

use crate::{
    ConfigError, IngestError, RenditionError, RepositoryError, StorageError, ValidationError,
};

/// This is the foundation error enum. Each concern in the workspace
/// contributes one variant through its own error family.
///
/// # Examples
///
/// ```
/// use vasari_error::{VasariError, ValidationError, ValidationErrorKind};
///
/// let validation = ValidationError::new(ValidationErrorKind::Undecodable("truncated".to_string()));
/// let err: VasariError = validation.into();
/// assert!(format!("{}", err).contains("Validation Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum VasariErrorKind {
    /// Upload validation error
    #[from(ValidationError)]
    Validation(ValidationError),
    /// Rendition generation error
    #[from(RenditionError)]
    Rendition(RenditionError),
    /// Storage backend error
    #[from(StorageError)]
    Storage(StorageError),
    /// Asset repository error
    #[from(RepositoryError)]
    Repository(RepositoryError),
    /// Bulk ingestion error
    #[from(IngestError)]
    Ingest(IngestError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
}

/// Vasari error with kind discrimination.
///
/// # Examples
///
/// ```
/// use vasari_error::{VasariResult, ConfigError};
///
/// fn might_fail() -> VasariResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Vasari Error: {}", _0)]
pub struct VasariError(Box<VasariErrorKind>);

impl VasariError {
    /// Create a new error from a kind.
    pub fn new(kind: VasariErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VasariErrorKind {
        &self.0
    }

    /// Whether the underlying kind reports a missing record or object.
    pub fn is_not_found(&self) -> bool {
        match self.kind() {
            VasariErrorKind::Storage(e) => e.is_not_found(),
            VasariErrorKind::Repository(e) => e.is_not_found(),
            _ => false,
        }
    }
}

// Generic From implementation for any type that converts to VasariErrorKind
impl<T> From<T> for VasariError
where
    T: Into<VasariErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vasari operations.
///
/// # Examples
///
/// ```
/// use vasari_error::{VasariResult, StorageError, StorageErrorKind};
///
/// fn read_object() -> VasariResult<Vec<u8>> {
///     Err(StorageError::new(StorageErrorKind::NotFound("missing".to_string())))?
/// }
/// ```
pub type VasariResult<T> = std::result::Result<T, VasariError>;
