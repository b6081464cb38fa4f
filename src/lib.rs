//! **Pre-commit hooks that catch undeclared open source software.**
//!
//! `oss-hooks` drives an external SCANOSS scanner (`scanoss-py` by default) from
//! git pre-commit hooks. It selects the files to scan, runs the scanner, merges
//! batched results into one results file and fails the commit while matches
//! are pending review.
//!
//! ## Core Concepts & Modules
//!
//! - **[`staged`]**: Selects files from the git index. Git failures are logged
//!   and treated as "nothing to scan".
//! - **[`scanner`]**: Builds [`ScanCommand`]s and runs them through a
//!   [`ProcessRunner`], redacting secrets from every logged command line.
//! - **[`results`]**: Merges a batch of results into the accumulated results
//!   file, keyed by file path.
//! - **[`present`]**: Asks the scanner for pending entries and renders them as
//!   a table.
//! - **[`hook`]**: The state machine tying these together, returning a
//!   [`HookOutcome`].
//! - **[`config`]**: YAML configuration discovery, validation and CLI merging.
//!
//! ## Running a Hook
//!
//! ```no_run
//! use oss_hooks::{HookConfig, HookOutcome, SystemRunner, run_scan_files};
//! use std::path::PathBuf;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HookConfig::default();
//!     let runner = SystemRunner::new();
//!     let files = vec![PathBuf::from("src/vendor.js")];
//!
//!     match run_scan_files(&config, &files, &runner)? {
//!         HookOutcome::Pending(report) => println!("{} files pending", report.count()),
//!         outcome => println!("exit code {}", outcome.exit_code()),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Testing Without the Scanner
//!
//! Every child process goes through [`ProcessRunner`], so tests can substitute
//! a fake that returns canned output for `git` and the scanner.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::cast_possible_truncation,
    clippy::struct_excessive_bools,
    clippy::module_name_repetitions
)]

pub mod cli;
pub mod config;
pub mod error;
pub mod hook;
pub mod present;
pub mod results;
pub mod scanner;
pub mod staged;

// Re-export main types for convenience
pub use config::{ConfigError, HookConfig, Validatable};
pub use error::{HookError, Result};
pub use hook::{HookOutcome, HookRun, HookState, run_scan_files, run_undeclared};
pub use present::{InspectOutcome, PendingEntry, PendingReport, inspect_results};
pub use results::{MergeOutcome, ResultsLayout, ResultsMap, merge_batch, merge_into};
pub use scanner::{
    Identification, MissingBomPolicy, ProcessOutput, ProcessRunner, ScanCommand, ScanOptions,
    ScanOutput, Scanner, SystemRunner, redact_args,
};
pub use staged::{DiffFilter, GitStagedFiles, StagedFileSet, StagedFileSource};
