//! Backend that shells out to the `git` binary

use crate::error::{Error, Result};
use crate::types::{Branch, Commit};
use crate::vcs::{ProductionPattern, VcsBackend};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// `git for-each-ref` format: full ref name, then the target of a symbolic ref
const REF_FORMAT: &str = "--format=%(refname)%09%(symref)";

const REMOTES_PREFIX: &str = "refs/remotes/";

/// `git log` format: hash, author email, committer email, author age,
/// committer age, committer unix timestamp
const LOG_FORMAT: &str = "--format=%H | %ae | %ce | %ar | %cr | %ct";

const FIELD_SEPARATOR: &str = " | ";

/// Limit on a single git invocation unless overridden
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Git repository accessed through the `git` CLI
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_dir: PathBuf,
    timeout: Duration,
}

impl GitCli {
    /// Open a repository, checking that `path` is inside a git work tree
    pub async fn open(path: &Path) -> Result<Self> {
        let backend = Self {
            repo_dir: path.to_path_buf(),
            timeout: DEFAULT_TIMEOUT,
        };

        let output = backend
            .run(&["rev-parse", "--is-inside-work-tree"])
            .await
            .map_err(|e| Error::BackendUnavailable(format!("{}: {e}", path.display())))?;

        if !output.status.success() {
            return Err(Error::BackendUnavailable(format!(
                "{} is not a git repository: {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(backend)
    }

    /// Repository directory git commands run in
    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    /// Limit how long each git invocation may run
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run git, killing it once the timeout elapses
    async fn run(&self, args: &[&str]) -> Result<Output> {
        debug!("git {}", args.join(" "));
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .kill_on_drop(true)
            .output();

        match tokio::time::timeout(self.timeout, output).await {
            Ok(output) => Ok(output?),
            Err(_) => Err(Error::Git(format!(
                "git {} timed out after {:?}",
                args.join(" "),
                self.timeout
            ))),
        }
    }
}

#[async_trait]
impl VcsBackend for GitCli {
    async fn list_remote_branches(&self) -> Result<Vec<Branch>> {
        let output = self
            .run(&["for-each-ref", REF_FORMAT, REMOTES_PREFIX])
            .await
            .map_err(|e| Error::BackendUnavailable(e.to_string()))?;

        if !output.status.success() {
            return Err(Error::BackendUnavailable(format!(
                "listing remote branches failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(parse_branch_list(&String::from_utf8_lossy(&output.stdout)))
    }

    async fn divergent_commits(
        &self,
        branch: &Branch,
        exclude: &ProductionPattern,
    ) -> Result<Vec<Commit>> {
        let remotes = format!("--remotes={}", exclude.remotes_glob());
        let output = self
            .run(&["log", branch.as_str(), "--not", &remotes, LOG_FORMAT, "--"])
            .await?;

        if !output.status.success() {
            return Err(Error::Git(format!(
                "git log {branch} failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_commit_log(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `git for-each-ref` output produced with [`REF_FORMAT`]
///
/// Symbolic refs such as `origin/HEAD` are aliases, not branches, and are
/// skipped.
pub fn parse_branch_list(stdout: &str) -> Vec<Branch> {
    stdout
        .lines()
        .filter_map(|line| {
            let (refname, symref) = line.split_once('\t').unwrap_or((line, ""));
            if !symref.trim().is_empty() {
                return None;
            }
            let name = refname.trim();
            let name = name.strip_prefix(REMOTES_PREFIX).unwrap_or(name);
            (!name.is_empty()).then(|| Branch::new(name))
        })
        .collect()
}

/// Parse the full output of a `git log` run with [`LOG_FORMAT`]
pub fn parse_commit_log(stdout: &str) -> Result<Vec<Commit>> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(parse_commit_line)
        .collect()
}

/// Parse one line of `git log` output produced with [`LOG_FORMAT`]
pub fn parse_commit_line(line: &str) -> Result<Commit> {
    let fields: Vec<&str> = line.splitn(6, FIELD_SEPARATOR).collect();
    let [sha, author_email, committer_email, author_age, committer_age, timestamp] =
        fields.as_slice()
    else {
        return Err(Error::Parse(format!(
            "expected 6 fields in log line, got {}: {line}",
            fields.len()
        )));
    };

    let committer_timestamp = timestamp
        .trim()
        .parse::<i64>()
        .map_err(|e| Error::Parse(format!("bad committer timestamp '{timestamp}': {e}")))?;

    Ok(Commit {
        sha: (*sha).to_string(),
        author_email: (*author_email).to_string(),
        committer_email: (*committer_email).to_string(),
        author_relative_age: (*author_age).to_string(),
        committer_relative_age: (*committer_age).to_string(),
        committer_timestamp,
    })
}
