//! Error types for git-harvest

use thiserror::Error;

/// Errors that can occur while analyzing a repository
#[derive(Debug, Error)]
pub enum Error {
    /// The repository cannot be read at all (bad path, git missing, not a work tree)
    #[error("repository unavailable: {0}")]
    BackendUnavailable(String),

    /// A single branch's divergence query failed
    #[error("query for branch '{branch}' failed: {cause}")]
    BranchQueryFailed {
        /// Branch whose query failed
        branch: String,
        /// Underlying failure
        cause: String,
    },

    /// A git command exited unsuccessfully
    #[error("git error: {0}")]
    Git(String),

    /// Output from git could not be parsed
    #[error("parse error: {0}")]
    Parse(String),

    /// Production branch name cannot be turned into a pattern
    #[error("invalid production branch '{0}'")]
    InvalidProductionBranch(String),

    /// Filesystem / process I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A spawned task panicked or was aborted
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;
