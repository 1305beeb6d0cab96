use thiserror::Error;

/// Errors that can occur during CLI command execution.
///
/// Any of these aborts the command with exit code 2.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(String),

    /// Franchise required but not found
    #[error("Unknown franchise: {0}")]
    UnknownFranchise(String),

    /// Platform vocabulary failed to load
    #[error("Vocabulary error: {0}")]
    Vocab(String),

    /// Bad command-line usage not caught by clap
    #[error("{0}")]
    Usage(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn unknown_franchise(msg: impl Into<String>) -> Self {
        Self::UnknownFranchise(msg.into())
    }

    pub(crate) fn vocab(msg: impl Into<String>) -> Self {
        Self::Vocab(msg.into())
    }

    pub(crate) fn usage(msg: impl Into<String>) -> Self {
        Self::Usage(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
