//! Production branch matching

use crate::error::{Error, Result};
use crate::types::Branch;
use regex::Regex;

/// Matches the production branch as seen on every remote
///
/// For production `master` this matches `origin/master` and
/// `upstream/master`, but not `origin/master-hotfix` or `origin/old-master`.
#[derive(Debug, Clone)]
pub struct ProductionPattern {
    name: String,
    suffix: Regex,
}

impl ProductionPattern {
    /// Build the pattern for a production branch name
    ///
    /// The name doubles as a `--remotes` glob for git, so anything git would
    /// not accept as a branch name is rejected. Glob characters in particular
    /// would make git exclude branches the suffix match keeps.
    pub fn new(production: &str) -> Result<Self> {
        let name = production.trim();
        if !is_valid_branch_name(name) {
            return Err(Error::InvalidProductionBranch(production.to_string()));
        }

        let suffix = Regex::new(&format!("/{}$", regex::escape(name)))
            .map_err(|_| Error::InvalidProductionBranch(production.to_string()))?;

        Ok(Self {
            name: name.to_string(),
            suffix,
        })
    }

    /// Production branch name without any remote prefix
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether `branch` is the production branch on some remote
    pub fn matches(&self, branch: &Branch) -> bool {
        self.suffix.is_match(branch.as_str())
    }

    /// Glob accepted by `git log --remotes=<glob>`
    pub fn remotes_glob(&self) -> String {
        format!("*/{}", self.name)
    }
}

/// Branch name rules of `git check-ref-format --branch`
fn is_valid_branch_name(name: &str) -> bool {
    const FORBIDDEN: &[char] = &['~', '^', ':', '?', '*', '[', '\\'];

    if name.is_empty()
        || name == "@"
        || name.starts_with('-')
        || name.starts_with('/')
        || name.ends_with('/')
        || name.ends_with('.')
        || name.ends_with(".lock")
        || name.contains("..")
        || name.contains("@{")
        || name.contains("//")
    {
        return false;
    }

    if name
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN.contains(&c))
    {
        return false;
    }

    name.split('/')
        .all(|component| !component.starts_with('.') && !component.ends_with(".lock"))
}
