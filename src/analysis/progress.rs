//! Progress callback trait for interface-agnostic updates
//!
//! Lets the CLI (or anything else) follow an analysis while it runs
//! without the analysis itself doing any output.

use crate::error::Error;
use crate::types::Branch;
use async_trait::async_trait;
use std::fmt;

/// Analysis phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Listing remote branches
    Listing,
    /// Querying each candidate branch for divergent commits
    Querying,
    /// Partitioning and ranking results
    Classifying,
    /// Analysis complete
    Complete,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Listing => "Listing remote branches",
            Self::Querying => "Comparing branches with production",
            Self::Classifying => "Classifying branches",
            Self::Complete => "Done",
        };
        f.write_str(label)
    }
}

/// How a single branch query settled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// No divergent commits
    Merged,
    /// Some divergent commits
    Diverged {
        /// Number of divergent commits
        commits: usize,
    },
    /// Query failed after all attempts
    Failed {
        /// Failure message
        cause: String,
    },
}

/// Progress callback trait
///
/// Callbacks are invoked from the task driving the analysis, never from the
/// per-branch query tasks, so implementations need no extra synchronization.
#[async_trait]
pub trait ProgressCallback: Send + Sync {
    /// Called when entering a new phase
    async fn on_phase(&self, phase: Phase);

    /// Called once the candidate set is known, before any query is issued
    async fn on_candidates(&self, total: usize);

    /// Called as each branch query settles, in completion order
    async fn on_branch_settled(&self, branch: &Branch, outcome: &QueryOutcome);

    /// Called when an error occurs (non-fatal)
    async fn on_error(&self, error: &Error);
}

/// No-op progress callback for testing or when progress isn't needed
pub struct NoopProgress;

#[async_trait]
impl ProgressCallback for NoopProgress {
    async fn on_phase(&self, _phase: Phase) {}
    async fn on_candidates(&self, _total: usize) {}
    async fn on_branch_settled(&self, _branch: &Branch, _outcome: &QueryOutcome) {}
    async fn on_error(&self, _error: &Error) {}
}
