//! Default command - classify remote branches and print the report

use crate::cli::progress::CliProgress;
use crate::cli::report::{print_json, print_report};
use crate::cli::style::Stylize;
use anstream::println;
use git_harvest::AnalyzeOptions;
use git_harvest::analysis::analyze_with;
use git_harvest::error::Result;
use git_harvest::types::Classification;
use git_harvest::vcs::GitCli;
use std::path::Path;
use std::sync::Arc;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    /// Colored text
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Run the analysis on the repository at `path` and print the report
///
/// Returns the classification so the caller can derive an exit status.
pub async fn run_analyze(
    path: &Path,
    production: &str,
    options: &AnalyzeOptions,
    format: ReportFormat,
    verbose: bool,
) -> Result<Classification> {
    let backend = GitCli::open(path).await?;

    let progress = match format {
        ReportFormat::Text => {
            println!(
                "Checking remote branches of {} against {}",
                backend.repo_dir().display().accent(),
                production.accent()
            );
            CliProgress::new(verbose)
        }
        ReportFormat::Json => CliProgress::hidden(),
    };

    let result = analyze_with(Arc::new(backend), production, options, &progress).await;
    progress.finish();
    let classification = result?;

    match format {
        ReportFormat::Text => {
            println!();
            print_report(&classification);
        }
        ReportFormat::Json => print_json(&classification)?,
    }

    Ok(classification)
}
