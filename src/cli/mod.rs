//! CLI commands
//!
//! Command implementations for the `harvest` binary.

mod analyze;
mod progress;
mod report;
mod style;

pub use analyze::{ReportFormat, run_analyze};
