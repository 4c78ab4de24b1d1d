//! Core types for git-harvest

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A remote-qualified branch name, e.g. `origin/feature-x`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Branch {
    /// Full name as listed by the VCS, including the remote prefix
    pub name: String,
}

impl Branch {
    /// Create a branch from its remote-qualified name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Full remote-qualified name
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// Remote part of the name (`origin` for `origin/feature-x`)
    ///
    /// Returns `None` for names without a slash.
    pub fn remote(&self) -> Option<&str> {
        self.name.split_once('/').map(|(remote, _)| remote)
    }

    /// Name on the remote, without the remote prefix (`feature-x`)
    ///
    /// Only the first segment is stripped, so `origin/team/topic` yields
    /// `team/topic`.
    pub fn short_name(&self) -> &str {
        self.name
            .split_once('/')
            .map_or(self.name.as_str(), |(_, rest)| rest)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Branch {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A commit as reported by the VCS backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit hash
    pub sha: String,
    /// Author email
    pub author_email: String,
    /// Committer email
    pub committer_email: String,
    /// Author date relative to now, e.g. "3 weeks ago"
    pub author_relative_age: String,
    /// Committer date relative to now
    pub committer_relative_age: String,
    /// Committer date, seconds since the epoch
    pub committer_timestamp: i64,
}

impl Commit {
    /// Committer date as a UTC timestamp
    ///
    /// Returns `None` if the timestamp is out of chrono's range.
    pub fn committed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.committer_timestamp, 0)
    }
}

/// A branch paired with the commits it has that production does not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivergenceRecord {
    /// The branch
    pub branch: Branch,
    /// Divergent commits, newest first
    pub commits: Vec<Commit>,
}

impl DivergenceRecord {
    /// Create a record
    pub const fn new(branch: Branch, commits: Vec<Commit>) -> Self {
        Self { branch, commits }
    }

    /// Whether the branch is fully incorporated into production
    pub fn is_merged(&self) -> bool {
        self.commits.is_empty()
    }

    /// Newest divergent commit
    pub fn latest(&self) -> Option<&Commit> {
        self.commits.first()
    }

    /// Number of divergent commits
    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }
}

/// A branch whose divergence query did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedBranch {
    /// The branch
    pub branch: Branch,
    /// Message of the last failure
    pub cause: String,
    /// How many times the query was issued
    pub attempts: u32,
}

/// Ordering applied to pending branches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    /// Branches whose newest commit is oldest come first
    #[default]
    OldestActivityFirst,
    /// Branches with the most divergent commits come first
    MostCommitsFirst,
}

/// Result of analyzing a repository against its production branch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Production branch name the analysis compared against
    pub production: String,
    /// Whether any listed branch matched the production branch
    pub production_found: bool,
    /// Policy used to rank `pending`
    pub sort_policy: SortPolicy,
    /// Branches with no divergent commits, in collector order
    pub harvestable: Vec<DivergenceRecord>,
    /// Branches with divergent commits, ranked
    pub pending: Vec<DivergenceRecord>,
    /// Branches whose query failed
    pub failed: Vec<FailedBranch>,
}

impl Classification {
    /// `(pending, harvestable)` counts
    pub fn score(&self) -> (usize, usize) {
        (self.pending.len(), self.harvestable.len())
    }

    /// Nothing pending and nothing failed
    pub fn is_clean(&self) -> bool {
        self.pending.is_empty() && self.failed.is_empty()
    }

    /// Total number of candidate branches examined
    pub fn candidate_count(&self) -> usize {
        self.harvestable.len() + self.pending.len() + self.failed.len()
    }
}
