//! Harvestable / pending partition

use crate::analysis::collect::CollectedDivergence;
use crate::types::{DivergenceRecord, FailedBranch};

/// Collected results split by divergence
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Records with no divergent commits
    pub harvestable: Vec<DivergenceRecord>,
    /// Records with at least one divergent commit
    pub pending: Vec<DivergenceRecord>,
    /// Branches whose query failed, passed through untouched
    pub failed: Vec<FailedBranch>,
}

/// Partition collected records into harvestable and pending
///
/// Both buckets keep collector order. Failed branches are never merged into
/// either bucket.
pub fn classify(collected: CollectedDivergence) -> Partition {
    let (harvestable, pending): (Vec<_>, Vec<_>) = collected
        .records
        .into_iter()
        .partition(DivergenceRecord::is_merged);

    Partition {
        harvestable,
        pending,
        failed: collected.failed,
    }
}
