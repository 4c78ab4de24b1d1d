//! harvest - find remote branches already merged into production
//!
//! CLI binary listing branches that can be deleted and ranking the ones
//! that still carry unmerged work.

use anyhow::Result;
use clap::Parser;
use git_harvest::AnalyzeOptions;
use git_harvest::types::SortPolicy;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "harvest")]
#[command(about = "Find remote branches merged into production and rank the rest")]
#[command(version)]
struct Cli {
    /// Path to the git repository (defaults to current directory)
    #[arg(short, long, env = "HARVEST_REPO")]
    repo: Option<PathBuf>,

    /// Branch running in production
    #[arg(short, long, env = "HARVEST_PROD", default_value = "master")]
    prod: String,

    /// Show branches with the most commits first (default: oldest activity first)
    #[arg(short = 'c', long)]
    most_commits: bool,

    /// Retry a failed branch query this many times before reporting it
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Maximum number of git processes at once (default: no limit)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Print the classification as JSON
    #[arg(long)]
    json: bool,

    /// Exit with status 1 when any branch is still pending
    #[arg(long)]
    fail_on_pending: bool,

    /// Print each branch as it is checked; repeat for debug logs
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 | 1 => "error",
        2 => "git_harvest=debug",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let path = cli.repo.unwrap_or_else(|| PathBuf::from("."));
    let options = AnalyzeOptions {
        sort_policy: if cli.most_commits {
            SortPolicy::MostCommitsFirst
        } else {
            SortPolicy::OldestActivityFirst
        },
        retries: cli.retries,
        max_concurrency: cli.jobs,
    };
    let format = if cli.json {
        cli::ReportFormat::Json
    } else {
        cli::ReportFormat::Text
    };

    let classification =
        cli::run_analyze(&path, &cli.prod, &options, format, cli.verbose > 0).await?;

    if cli.fail_on_pending && !classification.pending.is_empty() {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
