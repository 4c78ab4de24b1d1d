//! Spinner progress for the analyze command

use crate::cli::style::{Stylize, spinner_style};
use anstream::eprintln;
use async_trait::async_trait;
use git_harvest::analysis::{Phase, ProgressCallback, QueryOutcome};
use git_harvest::error::Error;
use git_harvest::types::Branch;
use indicatif::ProgressBar;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Spinner on stderr showing how many branch queries have settled
///
/// Hidden when stderr is not a terminal (indicatif's default).
pub struct CliProgress {
    spinner: ProgressBar,
    total: AtomicUsize,
    settled: AtomicUsize,
    verbose: bool,
}

impl CliProgress {
    /// Create a spinner; `verbose` also prints every settled branch
    pub fn new(verbose: bool) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(spinner_style());
        spinner.enable_steady_tick(Duration::from_millis(80));
        Self {
            spinner,
            total: AtomicUsize::new(0),
            settled: AtomicUsize::new(0),
            verbose,
        }
    }

    /// A spinner that never draws
    pub fn hidden() -> Self {
        Self {
            spinner: ProgressBar::hidden(),
            total: AtomicUsize::new(0),
            settled: AtomicUsize::new(0),
            verbose: false,
        }
    }

    /// Remove the spinner from the terminal
    pub fn finish(&self) {
        self.spinner.finish_and_clear();
    }
}

#[async_trait]
impl ProgressCallback for CliProgress {
    async fn on_phase(&self, phase: Phase) {
        match phase {
            Phase::Querying => {
                let total = self.total.load(Ordering::Relaxed);
                self.spinner.set_message(format!("{phase} (0/{total})"));
            }
            Phase::Complete => self.finish(),
            _ => self.spinner.set_message(format!("{phase}...")),
        }
    }

    async fn on_candidates(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
    }

    async fn on_branch_settled(&self, branch: &Branch, outcome: &QueryOutcome) {
        let settled = self.settled.fetch_add(1, Ordering::Relaxed) + 1;
        let total = self.total.load(Ordering::Relaxed);
        self.spinner
            .set_message(format!("{} ({settled}/{total})", Phase::Querying));

        if self.verbose {
            let detail = match outcome {
                QueryOutcome::Merged => "merged".to_string(),
                QueryOutcome::Diverged { commits } => format!("{commits} commits ahead"),
                QueryOutcome::Failed { cause } => format!("failed: {cause}"),
            };
            self.spinner
                .suspend(|| eprintln!("  {} {}", branch.muted().for_stderr(), detail));
        }
    }

    async fn on_error(&self, error: &Error) {
        self.spinner
            .suspend(|| eprintln!("{}: {}", "warning".warn(), error));
    }
}
