//! Staged file selection.
//!
//! Queries git for the files in the pending commit. Failures never block a
//! commit: they are logged and treated as "nothing to scan".

use crate::scanner::ProcessRunner;
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const GIT: &str = "git";

/// Which kinds of index changes are eligible for scanning.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum DiffFilter {
    /// Added, copied, modified
    AddedCopiedModified,
    /// Added, copied, modified, renamed
    #[default]
    WithRenames,
    /// Added, copied, modified, renamed, type-changed
    WithRenamesAndTypeChanges,
}

impl DiffFilter {
    /// Letters passed to `git diff --diff-filter`
    #[must_use]
    pub const fn letters(self) -> &'static str {
        match self {
            Self::AddedCopiedModified => "ACM",
            Self::WithRenames => "ACMR",
            Self::WithRenamesAndTypeChanges => "ACMRT",
        }
    }
}

/// Ordered list of staged paths, as reported by git.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedFileSet {
    files: Vec<String>,
}

impl StagedFileSet {
    #[must_use]
    pub const fn new(files: Vec<String>) -> Self {
        Self { files }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn files(&self) -> &[String] {
        &self.files
    }
}

impl FromIterator<String> for StagedFileSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Anything that can report the staged file set.
pub trait StagedFileSource {
    /// Staged files; an empty set on any failure.
    fn staged_files(&self) -> StagedFileSet;
}

/// Split `git diff --name-only` output into paths, dropping blank lines.
#[must_use]
pub fn parse_name_only(stdout: &str) -> StagedFileSet {
    stdout
        .trim()
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// [`StagedFileSource`] that shells out to git.
pub struct GitStagedFiles<'a, R: ProcessRunner + ?Sized> {
    runner: &'a R,
    filter: DiffFilter,
}

impl<'a, R: ProcessRunner + ?Sized> GitStagedFiles<'a, R> {
    pub fn new(runner: &'a R, filter: DiffFilter) -> Self {
        Self { runner, filter }
    }

    fn args(&self) -> Vec<String> {
        vec![
            "diff".to_string(),
            "--staged".to_string(),
            "--name-only".to_string(),
            format!("--diff-filter={}", self.filter.letters()),
        ]
    }
}

impl<R: ProcessRunner + ?Sized> StagedFileSource for GitStagedFiles<'_, R> {
    fn staged_files(&self) -> StagedFileSet {
        match self.runner.run(GIT, &self.args()) {
            Ok(out) if out.success() => parse_name_only(&out.stdout),
            Ok(out) => {
                tracing::error!(
                    "Git command failed with exit code {:?}: {}",
                    out.code,
                    out.stderr.trim()
                );
                StagedFileSet::default()
            }
            Err(e) => {
                tracing::error!("Git command failed: {e}");
                StagedFileSet::default()
            }
        }
    }
}

/// Tree hash of the current git index.
///
/// Identifies one commit attempt: every hook batch of the same attempt sees
/// the same index. `None` when git cannot write the tree.
pub fn index_tree<R: ProcessRunner + ?Sized>(runner: &R) -> Option<String> {
    match runner.run(GIT, &["write-tree".to_string()]) {
        Ok(out) if out.success() => {
            let tree = out.stdout.trim();
            (!tree.is_empty()).then(|| tree.to_string())
        }
        Ok(out) => {
            tracing::debug!(
                "git write-tree failed with exit code {:?}: {}",
                out.code,
                out.stderr.trim()
            );
            None
        }
        Err(e) => {
            tracing::debug!("git write-tree failed: {e}");
            None
        }
    }
}

/// Fixed file list, used for framework-provided filenames.
#[derive(Debug, Clone, Default)]
pub struct ExplicitFiles(pub Vec<PathBuf>);

impl StagedFileSource for ExplicitFiles {
    fn staged_files(&self) -> StagedFileSet {
        self.0
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .filter(|p| !p.is_empty())
            .collect()
    }
}
