//! Error types for the cf-repair crate.

use std::path::PathBuf;

/// Repair-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum RepairError {
    /// An edit-distance input was absent.
    #[error("Strings cannot be null")]
    NullInput,

    /// A rule that needs AEM author access was built without a client.
    #[error("AemAuthorClient not injected")]
    ClientNotInjected,

    /// A rule did not provide its own `apply_rule`.
    #[error("Subclasses must implement applyRule()")]
    NotImplemented,

    /// The AEM author client failed for a path.
    #[error("AEM author client failed for {path}: {reason}")]
    Client { path: String, reason: String },

    /// Configuration could not be loaded or is out of range.
    #[error("invalid configuration in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    /// An index exclusion glob does not compile.
    #[error("invalid exclude pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// I/O error with context.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RepairError {
    /// Build a [`RepairError::Client`] from anything displayable.
    pub fn client(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Client {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience result type for cf-repair operations.
pub type RepairResult<T> = Result<T, RepairError>;
