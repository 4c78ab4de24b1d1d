//! Pending branch ranking

use crate::types::{DivergenceRecord, SortPolicy};
use std::cmp::Reverse;

/// Order pending records in place under `policy`
///
/// The sort is stable: records that tie keep their current relative order.
pub fn rank_pending(pending: &mut [DivergenceRecord], policy: SortPolicy) {
    match policy {
        SortPolicy::OldestActivityFirst => {
            pending.sort_by_key(|record| record.latest().map(|c| c.committer_timestamp));
        }
        SortPolicy::MostCommitsFirst => {
            pending.sort_by_key(|record| Reverse(record.commit_count()));
        }
    }
}
