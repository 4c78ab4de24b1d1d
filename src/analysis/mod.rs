//! Branch divergence analysis
//!
//! Runs the whole pipeline against a [`VcsBackend`]:
//! 1. List remote branches
//! 2. Drop the production branch from the candidates
//! 3. Query every candidate's divergent commits concurrently
//! 4. Partition into harvestable / pending and rank the pending set

mod classify;
mod collect;
mod filter;
mod progress;
mod rank;

pub use classify::{Partition, classify};
pub use collect::{CollectOptions, CollectedDivergence, collect_divergence};
pub use filter::{FilteredBranches, filter_candidates};
pub use progress::{NoopProgress, Phase, ProgressCallback, QueryOutcome};
pub use rank::rank_pending;

use crate::error::{Error, Result};
use crate::types::{Classification, SortPolicy};
use crate::vcs::{ProductionPattern, VcsBackend};
use std::sync::Arc;
use tracing::debug;

/// Options for a single analysis run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Ordering for pending branches
    pub sort_policy: SortPolicy,
    /// Extra attempts for a failing branch query
    pub retries: u32,
    /// Maximum branch queries in flight; `None` means no limit
    pub max_concurrency: Option<usize>,
}

impl AnalyzeOptions {
    /// Default options with the given sort policy
    pub fn with_sort_policy(sort_policy: SortPolicy) -> Self {
        Self {
            sort_policy,
            ..Self::default()
        }
    }
}

/// Classify every remote branch against `production`
///
/// Only a failure to list branches aborts the run; per-branch failures end
/// up in [`Classification::failed`].
pub async fn analyze(
    backend: Arc<dyn VcsBackend>,
    production: &str,
    sort_policy: SortPolicy,
) -> Result<Classification> {
    analyze_with(
        backend,
        production,
        &AnalyzeOptions::with_sort_policy(sort_policy),
        &NoopProgress,
    )
    .await
}

/// [`analyze`] with explicit options and progress reporting
pub async fn analyze_with(
    backend: Arc<dyn VcsBackend>,
    production: &str,
    options: &AnalyzeOptions,
    progress: &dyn ProgressCallback,
) -> Result<Classification> {
    let pattern = ProductionPattern::new(production)?;

    progress.on_phase(Phase::Listing).await;
    let branches = backend.list_remote_branches().await.map_err(|e| match e {
        Error::BackendUnavailable(_) => e,
        other => Error::BackendUnavailable(other.to_string()),
    })?;
    debug!("Found {} remote branches", branches.len());

    let filtered = filter_candidates(branches, &pattern);
    let production_found = filtered.production_found();
    progress.on_candidates(filtered.candidates.len()).await;

    progress.on_phase(Phase::Querying).await;
    let collected = collect_divergence(
        backend,
        &filtered.candidates,
        &pattern,
        CollectOptions {
            retries: options.retries,
            max_concurrency: options.max_concurrency,
        },
        progress,
    )
    .await;

    progress.on_phase(Phase::Classifying).await;
    let Partition {
        harvestable,
        mut pending,
        failed,
    } = classify(collected);
    rank_pending(&mut pending, options.sort_policy);

    debug!(
        "{} harvestable, {} pending, {} failed",
        harvestable.len(),
        pending.len(),
        failed.len()
    );
    progress.on_phase(Phase::Complete).await;

    Ok(Classification {
        production: pattern.name().to_string(),
        production_found,
        sort_policy: options.sort_policy,
        harvestable,
        pending,
        failed,
    })
}
