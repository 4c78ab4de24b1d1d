//! Mock VCS backend for testing
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use async_trait::async_trait;
use git_harvest::error::{Error, Result};
use git_harvest::types::{Branch, Commit};
use git_harvest::vcs::{ProductionPattern, VcsBackend};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// In-memory backend with call tracking and error injection
///
/// Features:
/// - Configurable branch list and per-branch commits
/// - Per-branch delays to shuffle completion order
/// - Per-branch failures, optionally only for the first N attempts
/// - Tracks how many queries were in flight at once
pub struct MockBackend {
    branches: Mutex<Vec<Branch>>,
    commits: Mutex<HashMap<String, Vec<Commit>>>,
    delays: Mutex<HashMap<String, Duration>>,
    // Remaining failures per branch
    failures: Mutex<HashMap<String, usize>>,
    // Error injection for listing
    list_error: Mutex<Option<Error>>,
    // Call tracking
    list_calls: AtomicUsize,
    divergence_calls: Mutex<Vec<String>>,
    exclusion_globs: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockBackend {
    /// Backend listing the given branches, all fully merged
    pub fn with_branches(names: &[&str]) -> Self {
        Self {
            branches: Mutex::new(names.iter().copied().map(Branch::new).collect()),
            commits: Mutex::new(HashMap::new()),
            delays: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            list_error: Mutex::new(None),
            list_calls: AtomicUsize::new(0),
            divergence_calls: Mutex::new(Vec::new()),
            exclusion_globs: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Set the divergent commits returned for a branch
    pub fn set_commits(&self, branch: &str, commits: Vec<Commit>) {
        self.commits
            .lock()
            .unwrap()
            .insert(branch.to_string(), commits);
    }

    /// Delay a branch's query
    pub fn set_delay(&self, branch: &str, delay: Duration) {
        self.delays
            .lock()
            .unwrap()
            .insert(branch.to_string(), delay);
    }

    // === Error injection methods ===

    /// Make every query for `branch` fail
    pub fn fail_branch(&self, branch: &str) {
        self.fail_branch_times(branch, usize::MAX);
    }

    /// Make the first `times` queries for `branch` fail
    pub fn fail_branch_times(&self, branch: &str, times: usize) {
        self.failures
            .lock()
            .unwrap()
            .insert(branch.to_string(), times);
    }

    /// Make `list_remote_branches` return an error
    pub fn fail_listing(&self, error: Error) {
        *self.list_error.lock().unwrap() = Some(error);
    }

    // === Call verification methods ===

    /// Number of `list_remote_branches` calls
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Branches `divergent_commits` was called with, in call order
    pub fn divergence_calls(&self) -> Vec<String> {
        self.divergence_calls.lock().unwrap().clone()
    }

    /// Exclusion globs `divergent_commits` was called with
    pub fn exclusion_globs(&self) -> Vec<String> {
        self.exclusion_globs.lock().unwrap().clone()
    }

    /// Highest number of concurrent `divergent_commits` calls observed
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VcsBackend for MockBackend {
    async fn list_remote_branches(&self) -> Result<Vec<Branch>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(error) = self.list_error.lock().unwrap().take() {
            return Err(error);
        }

        Ok(self.branches.lock().unwrap().clone())
    }

    async fn divergent_commits(
        &self,
        branch: &Branch,
        exclude: &ProductionPattern,
    ) -> Result<Vec<Commit>> {
        self.divergence_calls
            .lock()
            .unwrap()
            .push(branch.name.clone());
        self.exclusion_globs
            .lock()
            .unwrap()
            .push(exclude.remotes_glob());

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let delay = self.delays.lock().unwrap().get(&branch.name).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        // Let other queries start even without a delay
        tokio::task::yield_now().await;

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let should_fail = {
            let mut failures = self.failures.lock().unwrap();
            match failures.get_mut(&branch.name) {
                Some(remaining) if *remaining > 0 => {
                    *remaining -= 1;
                    true
                }
                _ => false,
            }
        };
        if should_fail {
            return Err(Error::Git(format!(
                "fatal: bad revision '{}'",
                branch.name
            )));
        }

        Ok(self
            .commits
            .lock()
            .unwrap()
            .get(&branch.name)
            .cloned()
            .unwrap_or_default())
    }
}
