//! Version control backends
//!
//! Provides the read-only interface the analysis runs against, plus a
//! backend that drives the `git` binary.

mod git;
mod pattern;

pub use git::{GitCli, parse_branch_list, parse_commit_line, parse_commit_log};
pub use pattern::ProductionPattern;

use crate::error::Result;
use crate::types::{Branch, Commit};
use async_trait::async_trait;

/// Read-only access to a repository's remote branches and history
///
/// Implementations must be safe to query concurrently: the analysis issues
/// one `divergent_commits` call per branch, all in flight at once.
#[async_trait]
pub trait VcsBackend: Send + Sync {
    /// List every remote-tracking branch, remote-qualified (`origin/x`)
    ///
    /// Fails with [`Error::BackendUnavailable`](crate::error::Error::BackendUnavailable)
    /// when the repository cannot be read.
    async fn list_remote_branches(&self) -> Result<Vec<Branch>>;

    /// Commits reachable from `branch` but not from any branch matching
    /// `exclude`, newest first
    async fn divergent_commits(
        &self,
        branch: &Branch,
        exclude: &ProductionPattern,
    ) -> Result<Vec<Commit>>;
}
