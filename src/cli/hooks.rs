//! Hook command handlers.
//!
//! Implements the `undeclared` and `scan-files` subcommands.

use crate::config::{HookConfig, OutputConfig, Validatable};
use crate::hook::{HookOutcome, HookRun};
use crate::present::{render_clean, render_pending, should_use_color};
use crate::scanner::SystemRunner;
use crate::staged::GitStagedFiles;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

fn validated(config: &HookConfig) -> Result<()> {
    let errors = config.validate();
    if errors.is_empty() {
        return Ok(());
    }
    for error in &errors {
        tracing::error!("{error}");
    }
    bail!("invalid configuration ({} errors)", errors.len())
}

/// Run the `undeclared` hook over the files staged in git.
pub fn run_undeclared(config: &HookConfig, settings: Option<PathBuf>) -> Result<i32> {
    validated(config)?;
    let runner = SystemRunner::new();
    let staged = GitStagedFiles::new(&runner, config.scanner.diff_filter);
    let outcome = HookRun::new(config)
        .with_settings(settings)
        .undeclared(&staged, &runner)?;
    Ok(print_outcome(&outcome, config))
}

/// Run the `scan-files` hook over framework-provided file names.
pub fn run_scan_files(
    config: &HookConfig,
    files: &[PathBuf],
    settings: Option<PathBuf>,
) -> Result<i32> {
    validated(config)?;
    let runner = SystemRunner::new();
    let outcome = HookRun::new(config)
        .with_settings(settings)
        .scan_files(files, &runner)?;
    Ok(print_outcome(&outcome, config))
}

/// Text printed to stdout for an outcome, if any.
#[must_use]
pub fn render_outcome(outcome: &HookOutcome, results_path: &Path, colored: bool) -> Option<String> {
    match outcome {
        HookOutcome::Pending(report) => Some(render_pending(
            report,
            results_path,
            &OutputConfig::default().results_file,
            colored,
        )),
        HookOutcome::Clean => Some(render_clean(colored)),
        HookOutcome::NothingToScan | HookOutcome::ToolError { .. } => None,
    }
}

/// Print the rendered outcome and return its exit code.
pub fn print_outcome(outcome: &HookOutcome, config: &HookConfig) -> i32 {
    let colored = should_use_color(config.output.no_color);
    if let Some(text) = render_outcome(outcome, &config.output.results_file, colored) {
        println!("{text}");
    }
    outcome.exit_code()
}
