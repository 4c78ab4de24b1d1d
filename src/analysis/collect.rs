//! Divergence collection
//!
//! Queries every candidate branch concurrently and joins all results.
//! A failing branch never cancels the others.

use crate::analysis::progress::{ProgressCallback, QueryOutcome};
use crate::error::{Error, Result};
use crate::types::{Branch, Commit, DivergenceRecord, FailedBranch};
use crate::vcs::{ProductionPattern, VcsBackend};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Tuning for the collector
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectOptions {
    /// Extra attempts for a branch whose query fails
    pub retries: u32,
    /// Maximum queries in flight; `None` means no limit
    pub max_concurrency: Option<usize>,
}

/// Per-branch results, in candidate order
#[derive(Debug, Clone, Default)]
pub struct CollectedDivergence {
    /// Branches whose query succeeded
    pub records: Vec<DivergenceRecord>,
    /// Branches whose query failed
    pub failed: Vec<FailedBranch>,
}

/// Result of one branch's query task
struct SlotResult {
    result: Result<Vec<Commit>>,
    attempts: u32,
}

/// Query the divergence of every candidate against production
///
/// All queries are spawned up front and the function returns only after
/// every one of them has settled. Output keeps candidate order regardless of
/// completion order: each task owns one slot, and slots are merged after the
/// join.
pub async fn collect_divergence(
    backend: Arc<dyn VcsBackend>,
    candidates: &[Branch],
    pattern: &ProductionPattern,
    options: CollectOptions,
    progress: &dyn ProgressCallback,
) -> CollectedDivergence {
    if candidates.is_empty() {
        return CollectedDivergence::default();
    }

    let semaphore = options
        .max_concurrency
        .map(|limit| Arc::new(Semaphore::new(limit.max(1))));

    let mut tasks = JoinSet::new();
    for (slot, branch) in candidates.iter().enumerate() {
        let backend = Arc::clone(&backend);
        let branch = branch.clone();
        let pattern = pattern.clone();
        let semaphore = semaphore.clone();
        let retries = options.retries;

        tasks.spawn(async move {
            let _permit = match semaphore {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };
            let outcome = query_with_retries(backend.as_ref(), &branch, &pattern, retries).await;
            (slot, outcome)
        });
    }

    debug!("Dispatched {} divergence queries", candidates.len());

    let mut slots: Vec<Option<SlotResult>> = candidates.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((slot, outcome)) => {
                let branch = &candidates[slot];
                if let Err(e) = &outcome.result {
                    progress
                        .on_error(&Error::BranchQueryFailed {
                            branch: branch.to_string(),
                            cause: e.to_string(),
                        })
                        .await;
                }
                progress
                    .on_branch_settled(branch, &summarize(&outcome))
                    .await;
                slots[slot] = Some(outcome);
            }
            Err(e) => {
                // The slot stays empty and is reported as failed below.
                warn!("Divergence query task did not complete: {e}");
                progress.on_error(&Error::Internal(e.to_string())).await;
            }
        }
    }

    let mut collected = CollectedDivergence::default();
    for (branch, slot) in candidates.iter().zip(slots) {
        match slot {
            Some(SlotResult {
                result: Ok(commits),
                ..
            }) => collected
                .records
                .push(DivergenceRecord::new(branch.clone(), commits)),
            Some(SlotResult {
                result: Err(e),
                attempts,
            }) => collected.failed.push(FailedBranch {
                branch: branch.clone(),
                cause: e.to_string(),
                attempts,
            }),
            None => collected.failed.push(FailedBranch {
                branch: branch.clone(),
                cause: "query task panicked".to_string(),
                attempts: 1,
            }),
        }
    }

    collected
}

/// Issue one branch's query, retrying up to `retries` extra times
async fn query_with_retries(
    backend: &dyn VcsBackend,
    branch: &Branch,
    pattern: &ProductionPattern,
    retries: u32,
) -> SlotResult {
    let mut attempts = 0;
    loop {
        attempts += 1;
        match backend.divergent_commits(branch, pattern).await {
            Ok(commits) => {
                debug!("{branch}: {} divergent commits", commits.len());
                return SlotResult {
                    result: Ok(commits),
                    attempts,
                };
            }
            Err(e) if attempts <= retries => {
                debug!("{branch}: attempt {attempts} failed, retrying: {e}");
            }
            Err(e) => {
                warn!("{branch}: divergence query failed: {e}");
                return SlotResult {
                    result: Err(e),
                    attempts,
                };
            }
        }
    }
}

fn summarize(outcome: &SlotResult) -> QueryOutcome {
    match &outcome.result {
        Ok(commits) if commits.is_empty() => QueryOutcome::Merged,
        Ok(commits) => QueryOutcome::Diverged {
            commits: commits.len(),
        },
        Err(e) => QueryOutcome::Failed {
            cause: e.to_string(),
        },
    }
}
