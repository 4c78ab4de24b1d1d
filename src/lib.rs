//! git-harvest - find merged remote branches and rank the rest
//!
//! Compares every remote branch of a git repository with a production
//! branch. Branches with no commits outside production are harvestable
//! (safe to delete); the others are pending and get ranked for triage.
//!
//! ```no_run
//! use git_harvest::analysis::analyze;
//! use git_harvest::types::SortPolicy;
//! use git_harvest::vcs::GitCli;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn run() -> git_harvest::error::Result<()> {
//! let backend = GitCli::open(Path::new(".")).await?;
//! let classification = analyze(Arc::new(backend), "master", SortPolicy::default()).await?;
//! println!("{} branches can be deleted", classification.harvestable.len());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod error;
pub mod types;
pub mod vcs;

pub use analysis::{AnalyzeOptions, analyze, analyze_with};
