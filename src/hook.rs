//! Hook driver.
//!
//! Both hook variants walk the same states:
//!
//! ```text
//! Start -> SelectingFiles -> NoFiles
//!                         -> Scanning -> ScanFailed
//!                                     -> Merging -> Presenting -> Pending | Clean | ToolError
//! ```
//!
//! The driver returns a [`HookOutcome`]; only `main` converts it into a
//! process exit code.

use crate::config::HookConfig;
use crate::error::Result;
use crate::present::{InspectOutcome, PendingReport, inspect_results};
use crate::results::{MergeOutcome, ResultsLayout, merge_into};
use crate::scanner::{
    Identification, ProcessRunner, ScanCommand, ScanOutput, Scanner, resolve_identification,
};
use crate::staged::{ExplicitFiles, StagedFileSet, StagedFileSource, index_tree};
use std::path::{Path, PathBuf};

/// Exit codes for pre-commit integration
pub mod exit_codes {
    /// Nothing pending, or nothing to scan
    pub const SUCCESS: i32 = 0;
    /// Pending results, or the hook itself failed
    pub const FAILURE: i32 = 1;
}

/// Driver states, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookState {
    Start,
    SelectingFiles,
    NoFiles,
    Scanning,
    ScanFailed,
    Merging,
    Presenting,
    Pending,
    Clean,
    ToolError,
}

impl std::fmt::Display for HookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::SelectingFiles => "selecting-files",
            Self::NoFiles => "no-files",
            Self::Scanning => "scanning",
            Self::ScanFailed => "scan-failed",
            Self::Merging => "merging",
            Self::Presenting => "presenting",
            Self::Pending => "pending",
            Self::Clean => "clean",
            Self::ToolError => "tool-error",
        };
        f.write_str(name)
    }
}

/// Terminal result of a hook run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// No eligible files; the scanner was never invoked
    NothingToScan,
    /// Scan finished with nothing pending
    Clean,
    /// Scan finished with entries awaiting review
    Pending(PendingReport),
    /// The results inspection tool failed with its own exit code
    ToolError { code: i32, message: String },
}

impl HookOutcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::NothingToScan | Self::Clean => exit_codes::SUCCESS,
            Self::Pending(_) => exit_codes::FAILURE,
            Self::ToolError { code, .. } => *code,
        }
    }
}

impl From<InspectOutcome> for HookOutcome {
    fn from(outcome: InspectOutcome) -> Self {
        match outcome {
            InspectOutcome::Clean => Self::Clean,
            InspectOutcome::Pending(report) => Self::Pending(report),
            InspectOutcome::ToolError { code, message } => Self::ToolError { code, message },
        }
    }
}

/// One hook invocation over a configuration.
#[derive(Debug)]
pub struct HookRun<'a> {
    config: &'a HookConfig,
    root: PathBuf,
    settings: Option<PathBuf>,
    state: HookState,
}

impl<'a> HookRun<'a> {
    /// Run relative to the current directory.
    #[must_use]
    pub fn new(config: &'a HookConfig) -> Self {
        Self {
            config,
            root: PathBuf::from("."),
            settings: None,
            state: HookState::Start,
        }
    }

    /// Resolve identification and results paths under `root`.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Use this settings file instead of searching for one.
    #[must_use]
    pub fn with_settings(mut self, settings: Option<PathBuf>) -> Self {
        self.settings = settings;
        self
    }

    /// Current state, mainly for diagnostics.
    #[must_use]
    pub const fn state(&self) -> HookState {
        self.state
    }

    fn enter(&mut self, next: HookState) {
        tracing::debug!("Hook state: {} -> {next}", self.state);
        self.state = next;
    }

    fn layout(&self) -> ResultsLayout {
        self.config.layout().rooted(&self.root)
    }

    /// Create the results directory and reset results left by an earlier
    /// commit attempt.
    fn prepare<R: ProcessRunner + ?Sized>(
        &self,
        runner: &R,
        layout: &ResultsLayout,
    ) -> Result<()> {
        let accumulate = self.config.output.accumulate;
        let attempt = if accumulate { index_tree(runner) } else { None };
        layout.prepare(accumulate, attempt.as_deref())
    }

    fn select<S: StagedFileSource + ?Sized>(&mut self, source: &S) -> Option<StagedFileSet> {
        self.enter(HookState::SelectingFiles);
        let files = source.staged_files();
        if files.is_empty() {
            self.enter(HookState::NoFiles);
            tracing::info!("No files to scan. Skipping SCANOSS");
            return None;
        }
        tracing::debug!("Files to scan: {:?}", files.files());
        Some(files)
    }

    fn scan<R: ProcessRunner + ?Sized>(
        &mut self,
        runner: &R,
        files: &StagedFileSet,
        output: &ScanOutput,
    ) -> Result<()> {
        self.enter(HookState::Scanning);
        let identification = self.identification()?;
        let command = ScanCommand::scan(&self.config.scanner.program)
            .identification(&identification)
            .options(&self.config.scan_options())
            .files(files.files());

        Scanner::new(runner)
            .run_scan(command, output)
            .inspect_err(|_| self.enter(HookState::ScanFailed))
    }

    fn identification(&self) -> Result<Identification> {
        resolve_identification(&self.root, &self.config.scanner, self.settings.as_deref())
    }

    fn merge(&mut self, layout: &ResultsLayout) -> Result<MergeOutcome> {
        self.enter(HookState::Merging);
        let outcome = merge_into(&layout.results, &layout.temp)?;
        if let MergeOutcome::Merged { batch, total } = outcome {
            tracing::debug!("Merged {batch} entries; {total} files in results");
        }
        Ok(outcome)
    }

    fn present<R: ProcessRunner + ?Sized>(
        &mut self,
        runner: &R,
        results: &Path,
    ) -> Result<HookOutcome> {
        self.enter(HookState::Presenting);
        let outcome = HookOutcome::from(inspect_results(
            runner,
            &self.config.scanner.program,
            results,
        )?);
        self.enter(match outcome {
            HookOutcome::Pending(_) => HookState::Pending,
            HookOutcome::ToolError { .. } => HookState::ToolError,
            HookOutcome::NothingToScan | HookOutcome::Clean => HookState::Clean,
        });
        Ok(outcome)
    }

    /// Scan the files staged in git, capturing scanner stdout as the results.
    ///
    /// When accumulating, the batch is captured to the temp file and merged
    /// into the results of the same commit attempt instead of replacing them.
    pub fn undeclared<S, R>(mut self, source: &S, runner: &R) -> Result<HookOutcome>
    where
        S: StagedFileSource + ?Sized,
        R: ProcessRunner + ?Sized,
    {
        let Some(files) = self.select(source) else {
            return Ok(HookOutcome::NothingToScan);
        };

        let layout = self.layout();
        if self.config.output.accumulate {
            self.prepare(runner, &layout)?;
            self.scan(runner, &files, &ScanOutput::Capture(layout.temp.clone()))?;
            self.merge(&layout)?;
        } else {
            self.scan(runner, &files, &ScanOutput::Capture(layout.results.clone()))?;
        }

        self.present(runner, &layout.results)
    }

    /// Scan framework-provided files in batches that accumulate into one
    /// results file for the current commit attempt.
    pub fn scan_files<R: ProcessRunner + ?Sized>(
        mut self,
        files: &[PathBuf],
        runner: &R,
    ) -> Result<HookOutcome> {
        let layout = self.layout();
        self.prepare(runner, &layout)?;

        let Some(files) = self.select(&ExplicitFiles(files.to_vec())) else {
            return Ok(HookOutcome::NothingToScan);
        };

        self.scan(runner, &files, &ScanOutput::Flag(layout.temp.clone()))?;
        self.merge(&layout)?;
        self.present(runner, &layout.results)
    }
}

/// Scan staged files from `source` using `config`.
pub fn run_undeclared<S, R>(config: &HookConfig, source: &S, runner: &R) -> Result<HookOutcome>
where
    S: StagedFileSource + ?Sized,
    R: ProcessRunner + ?Sized,
{
    HookRun::new(config).undeclared(source, runner)
}

/// Scan an explicit file list using `config`.
pub fn run_scan_files<R: ProcessRunner + ?Sized>(
    config: &HookConfig,
    files: &[PathBuf],
    runner: &R,
) -> Result<HookOutcome> {
    HookRun::new(config).scan_files(files, runner)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(HookOutcome::NothingToScan.exit_code(), 0);
        assert_eq!(HookOutcome::Clean.exit_code(), 0);
        assert_eq!(
            HookOutcome::Pending(PendingReport::default()).exit_code(),
            1
        );
        assert_eq!(
            HookOutcome::ToolError {
                code: 7,
                message: String::new()
            }
            .exit_code(),
            7
        );
    }

    #[test]
    fn test_inspect_outcome_conversion() {
        assert_eq!(HookOutcome::from(InspectOutcome::Clean), HookOutcome::Clean);
        assert!(matches!(
            HookOutcome::from(InspectOutcome::ToolError {
                code: 3,
                message: "x".to_string()
            }),
            HookOutcome::ToolError { code: 3, .. }
        ));
    }

    #[test]
    fn test_state_display() {
        assert_eq!(HookState::SelectingFiles.to_string(), "selecting-files");
        assert_eq!(HookState::ScanFailed.to_string(), "scan-failed");
    }

    #[test]
    fn test_new_run_starts_at_start() {
        let config = HookConfig::default();
        assert_eq!(HookRun::new(&config).state(), HookState::Start);
    }
}
