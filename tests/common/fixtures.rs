//! Test data factories for git-harvest types
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use super::mock_backend::MockBackend;
use async_trait::async_trait;
use git_harvest::analysis::{Phase, ProgressCallback, QueryOutcome};
use git_harvest::error::Error;
use git_harvest::types::{Branch, Commit, DivergenceRecord};
use std::sync::Mutex;

/// Create a commit with the given committer timestamp
pub fn make_commit(timestamp: i64) -> Commit {
    Commit {
        sha: format!("{timestamp:040x}"),
        author_email: "author@example.com".to_string(),
        committer_email: "committer@example.com".to_string(),
        author_relative_age: "3 weeks ago".to_string(),
        committer_relative_age: "2 weeks ago".to_string(),
        committer_timestamp: timestamp,
    }
}

/// Create commits with the given timestamps, newest first as listed
pub fn make_commits(timestamps: &[i64]) -> Vec<Commit> {
    timestamps.iter().copied().map(make_commit).collect()
}

/// Branch names of a list of records
pub fn names(records: &[DivergenceRecord]) -> Vec<String> {
    records.iter().map(|r| r.branch.name.clone()).collect()
}

/// The reference repository:
/// - `origin/master`: production
/// - `origin/a`: merged
/// - `origin/b`: 3 commits, newest at 1000
/// - `origin/c`: 1 commit at 500
pub fn reference_backend() -> MockBackend {
    let backend = MockBackend::with_branches(&["origin/master", "origin/a", "origin/b", "origin/c"]);
    backend.set_commits("origin/b", make_commits(&[1000, 900, 800]));
    backend.set_commits("origin/c", make_commits(&[500]));
    backend
}

/// A progress event, as recorded by [`RecordingProgress`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Phase(Phase),
    Candidates(usize),
    Settled(String, QueryOutcome),
    Error(String),
}

/// Progress callback that records every event
#[derive(Default)]
pub struct RecordingProgress {
    events: Mutex<Vec<ProgressEvent>>,
}

impl RecordingProgress {
    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[async_trait]
impl ProgressCallback for RecordingProgress {
    async fn on_phase(&self, phase: Phase) {
        self.push(ProgressEvent::Phase(phase));
    }

    async fn on_candidates(&self, total: usize) {
        self.push(ProgressEvent::Candidates(total));
    }

    async fn on_branch_settled(&self, branch: &Branch, outcome: &QueryOutcome) {
        self.push(ProgressEvent::Settled(branch.name.clone(), outcome.clone()));
    }

    async fn on_error(&self, error: &Error) {
        self.push(ProgressEvent::Error(error.to_string()));
    }
}
