//! Asset repository error types.

/// Kinds of repository errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum RepositoryErrorKind {
    /// Referenced asset or parent does not exist
    #[display("Not found: {}", _0)]
    NotFound(String),
    /// Concurrent mutation detected; the caller should retry
    #[display("Conflict: {}", _0)]
    Conflict(String),
    /// A transaction could not be committed
    #[display("Transaction failed: {}", _0)]
    Transaction(String),
}

/// Repository error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Repository Error: {} at line {} in {}", kind, line, file)]
pub struct RepositoryError {
    /// The kind of error that occurred
    pub kind: RepositoryErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl RepositoryError {
    /// Create a new repository error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RepositoryErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a `NotFound` error.
    #[track_caller]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(RepositoryErrorKind::NotFound(what.into()))
    }

    /// Whether this error indicates a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, RepositoryErrorKind::NotFound(_))
    }
}
