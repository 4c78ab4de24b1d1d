//! Branch filtering
//!
//! Removes the production branch (on every remote) from the candidate set.

use crate::types::Branch;
use crate::vcs::ProductionPattern;
use tracing::{debug, warn};

/// Branches split into candidates and production aliases
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredBranches {
    /// Branches to analyze, in listing order
    pub candidates: Vec<Branch>,
    /// Branches recognized as the production branch
    pub excluded: Vec<Branch>,
}

impl FilteredBranches {
    /// Whether any listed branch was the production branch
    pub fn production_found(&self) -> bool {
        !self.excluded.is_empty()
    }
}

/// Split `branches` into candidates and production branches
///
/// A missing production branch is not an error: every branch is kept and
/// the caller can check [`FilteredBranches::production_found`].
pub fn filter_candidates(branches: Vec<Branch>, pattern: &ProductionPattern) -> FilteredBranches {
    let (excluded, candidates): (Vec<Branch>, Vec<Branch>) =
        branches.into_iter().partition(|b| pattern.matches(b));

    if excluded.is_empty() {
        warn!(
            "No remote branch matches production branch '{}'; nothing excluded",
            pattern.name()
        );
    } else {
        debug!(
            "Excluding production branches: {:?}",
            excluded.iter().map(Branch::as_str).collect::<Vec<_>>()
        );
    }

    FilteredBranches {
        candidates,
        excluded,
    }
}
