//! Bulk ingestion error types.

/// Kinds of bulk ingestion errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum IngestErrorKind {
    /// Batch exceeds the configured size limit; rejected before any work
    #[display("Batch of {} items exceeds limit of {}", size, limit)]
    BatchTooLarge {
        /// Number of items submitted
        size: usize,
        /// Configured maximum batch size
        limit: usize,
    },
    /// Item was not scheduled because the batch was cancelled
    #[display("Cancelled before processing")]
    Cancelled,
}

/// Bulk ingestion error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Ingest Error: {} at line {} in {}", kind, line, file)]
pub struct IngestError {
    /// The kind of error that occurred
    pub kind: IngestErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl IngestError {
    /// Create a new ingest error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: IngestErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
