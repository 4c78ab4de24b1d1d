//! Human-readable and JSON rendering of a classification

use crate::cli::style::{Stylize, check, cross};
use anstream::println;
use git_harvest::error::{Error, Result};
use git_harvest::types::{Classification, DivergenceRecord, SortPolicy};

/// Remote assumed for branches listed without one
const DEFAULT_REMOTE: &str = "origin";

/// Print the classification as pretty JSON on stdout
pub fn print_json(classification: &Classification) -> Result<()> {
    let json = serde_json::to_string_pretty(classification)
        .map_err(|e| Error::Internal(format!("Failed to serialize report: {e}")))?;
    println!("{json}");
    Ok(())
}

/// Print the text report on stdout
pub fn print_report(classification: &Classification) {
    let production = classification.production.as_str();

    if !classification.production_found {
        println!(
            "{} no remote branch named '{}' was found; nothing is compared against production, so no branch can be harvested",
            "warning:".warn().for_stdout(),
            production.accent()
        );
        println!();
    }

    print_harvestable(classification);
    print_pending(classification);
    print_failed(classification);

    let (rotten, harvested) = classification.score();
    println!(
        "{}",
        "rotten = branches still waiting to get into production, harvested = merged branches that can be deleted"
            .muted()
    );
    println!(
        "Score: {}",
        format!("#rotten:{rotten}/harvested:{harvested}").accent()
    );
}

fn print_harvestable(classification: &Classification) {
    let production = classification.production.as_str();

    if classification.harvestable.is_empty() {
        println!(
            "{} No branches already merged into {}",
            check(),
            production.accent()
        );
        println!();
        return;
    }

    // Reverse of collector order, so the earliest-listed branches end up last.
    let harvestable: Vec<&DivergenceRecord> = classification.harvestable.iter().rev().collect();

    println!(
        "{}",
        format!("Merged into {production}, safe to delete:").emphasis()
    );
    for record in &harvestable {
        println!("    {}", record.branch.success());
    }
    println!();
    println!("{}", "Paste the following to delete them all:".emphasis());
    for command in delete_commands(&harvestable) {
        println!("{command}");
    }
    println!();
}

fn print_pending(classification: &Classification) {
    let production = classification.production.as_str();

    if classification.pending.is_empty() {
        println!(
            "{} No remote branches waiting to get into {}",
            check(),
            production.accent()
        );
        println!();
        return;
    }

    let order = match classification.sort_policy {
        SortPolicy::OldestActivityFirst => "oldest activity first",
        SortPolicy::MostCommitsFirst => "most commits first",
    };
    println!(
        "{} {}",
        format!("Waiting to get into {production}:").emphasis(),
        format!("({order})").muted()
    );

    for record in &classification.pending {
        println!("    {}", pending_line(record));
    }
    println!();
}

fn print_failed(classification: &Classification) {
    if classification.failed.is_empty() {
        return;
    }

    println!(
        "{}",
        "Could not be compared (not counted as merged):".emphasis()
    );
    for failed in &classification.failed {
        println!(
            "    {} {}: {}",
            cross(),
            failed.branch.rotten(),
            failed.cause.muted()
        );
    }
    println!();
}

/// One pending line: commit count, branch, latest activity
fn pending_line(record: &DivergenceRecord) -> String {
    let count = format!("{:>5}", record.commit_count());
    match record.latest() {
        Some(latest) => format!(
            "{}    {}    updated {} / committer {}, {}.",
            count.accent(),
            record.branch.rotten(),
            latest.author_relative_age,
            latest.committer_email.success(),
            latest.committer_relative_age
        ),
        None => format!("{}    {}", count.accent(), record.branch.rotten()),
    }
}

/// Shell commands deleting each branch on its remote and locally
pub fn delete_commands(records: &[&DivergenceRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| {
            let remote = record.branch.remote().unwrap_or(DEFAULT_REMOTE);
            let name = record.branch.short_name();
            format!("git push {remote} :{name}; git branch -D {name};")
        })
        .collect()
}
