//! Rendition generation error types.

/// Kinds of rendition generation failures.
///
/// Generation is all-or-nothing across the rendition set for one asset, so
/// any kind here fails the whole set. These are transient-capable: the
/// caller may retry the full create.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RenditionErrorKind {
    /// Original bytes failed to decode at generation time
    #[display("Rendition generation failed to decode original: {}", _0)]
    Decode(String),
    /// A rendition failed to encode
    #[display("Rendition generation failed to encode '{}': {}", name, detail)]
    Encode {
        /// Name of the rendition spec that failed
        name: String,
        /// Encoder error detail
        detail: String,
    },
    /// The blocking worker running generation did not complete
    #[display("Rendition worker failed: {}", _0)]
    Worker(String),
}

/// Rendition generation error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Rendition Error: {} at line {} in {}", kind, line, file)]
pub struct RenditionError {
    /// The kind of error that occurred
    pub kind: RenditionErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RenditionError {
    /// Create a new rendition error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RenditionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
