//! Real git repositories for backend and CLI tests
//!
//! These are test utilities - not all may be used in every test binary.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Committer date of the commits on `feature`
pub const FEATURE_TIMESTAMP: i64 = 1_600_000_000;
/// Committer date of the commit on `master-hotfix`
pub const HOTFIX_TIMESTAMP: i64 = 1_700_000_000;

/// Run git in `dir` with a fixed identity, panicking on failure
pub fn git(dir: &Path, args: &[&str]) -> String {
    git_at(dir, args, 1_500_000_000)
}

/// Run git with author and committer dates pinned to `timestamp`
pub fn git_at(dir: &Path, args: &[&str], timestamp: i64) -> String {
    let date = format!("{timestamp} +0000");
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "Test Author")
        .env("GIT_AUTHOR_EMAIL", "author@example.com")
        .env("GIT_COMMITTER_NAME", "Test Committer")
        .env("GIT_COMMITTER_EMAIL", "committer@example.com")
        .env("GIT_AUTHOR_DATE", &date)
        .env("GIT_COMMITTER_DATE", &date)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("HOME", dir)
        .output()
        .expect("git should be installed");
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// A clone whose `origin` has these branches:
/// - `master`: production, one commit
/// - `merged`, `released`: point at master
/// - `feature`: two commits on top of master
/// - `master-hotfix`: one commit on top of master
pub struct TestRepo {
    _dir: TempDir,
    /// The clone to analyze
    pub work: PathBuf,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let upstream = dir.path().join("upstream");
        let work = dir.path().join("work");
        std::fs::create_dir(&upstream).unwrap();

        git(&upstream, &["init", "-q"]);
        git(&upstream, &["symbolic-ref", "HEAD", "refs/heads/master"]);
        commit_file(&upstream, "README", "hello", 1_500_000_000);
        git(&upstream, &["branch", "merged"]);
        git(&upstream, &["branch", "released"]);

        git(&upstream, &["checkout", "-q", "-b", "feature"]);
        commit_file(&upstream, "feature-1.txt", "one", FEATURE_TIMESTAMP - 10);
        commit_file(&upstream, "feature-2.txt", "two", FEATURE_TIMESTAMP);

        git(&upstream, &["checkout", "-q", "master"]);
        git(&upstream, &["checkout", "-q", "-b", "master-hotfix"]);
        commit_file(&upstream, "hotfix.txt", "fix", HOTFIX_TIMESTAMP);
        git(&upstream, &["checkout", "-q", "master"]);

        git(
            dir.path(),
            &["clone", "-q", upstream.to_str().unwrap(), work.to_str().unwrap()],
        );

        Self { _dir: dir, work }
    }

    /// Commit id a remote branch points at
    pub fn rev(&self, branch: &str) -> String {
        git(&self.work, &["rev-parse", branch])
    }
}

fn commit_file(dir: &Path, name: &str, contents: &str, timestamp: i64) {
    std::fs::write(dir.join(name), contents).unwrap();
    git(dir, &["add", name]);
    git_at(dir, &["commit", "-q", "-m", &format!("add {name}")], timestamp);
}
