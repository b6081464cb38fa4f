//! On-disk locations of the results files.

use crate::error::{HookError, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_RESULTS_DIR: &str = ".scanoss";
pub const DEFAULT_RESULTS_FILENAME: &str = "results.json";
pub const DEFAULT_TEMP_FILENAME: &str = "temp_results.json";

/// Extension of the marker recording which commit attempt owns the results.
const ATTEMPT_EXTENSION: &str = "attempt";

/// Results directory plus the accumulated and per-batch file paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultsLayout {
    pub dir: PathBuf,
    pub results: PathBuf,
    pub temp: PathBuf,
    /// Index tree hash of the commit attempt that started `results`
    pub attempt: PathBuf,
}

impl Default for ResultsLayout {
    fn default() -> Self {
        Self::in_dir(DEFAULT_RESULTS_DIR)
    }
}

impl ResultsLayout {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let results = dir.join(DEFAULT_RESULTS_FILENAME);
        Self {
            attempt: results.with_extension(ATTEMPT_EXTENSION),
            temp: dir.join(DEFAULT_TEMP_FILENAME),
            results,
            dir,
        }
    }

    /// Layout for a custom results file; the batch file sits next to it.
    pub fn for_results_file(results: impl Into<PathBuf>) -> Self {
        let results = results.into();
        let dir = results
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Self {
            attempt: results.with_extension(ATTEMPT_EXTENSION),
            temp: dir.join(DEFAULT_TEMP_FILENAME),
            results,
            dir,
        }
    }

    /// Re-root relative paths under `root`.
    #[must_use]
    pub fn rooted(self, root: &Path) -> Self {
        let join = |p: PathBuf| if p.is_absolute() { p } else { root.join(p) };
        Self {
            dir: join(self.dir),
            results: join(self.results),
            temp: join(self.temp),
            attempt: join(self.attempt),
        }
    }

    /// Create the results directory and drop results that must not be reused.
    ///
    /// Without accumulation the results are always dropped. With accumulation
    /// they are kept only while `attempt` matches the recorded commit attempt;
    /// an unknown attempt keeps whatever is there.
    pub fn prepare(&self, accumulate: bool, attempt: Option<&str>) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| HookError::io(&self.dir, e))?;
        if !accumulate {
            return remove_if_exists(&self.results);
        }
        let Some(attempt) = attempt else {
            tracing::debug!("Commit attempt unknown; keeping {}", self.results.display());
            return Ok(());
        };

        let recorded = std::fs::read_to_string(&self.attempt).ok();
        if recorded.as_deref().map(str::trim) != Some(attempt) {
            tracing::debug!("New commit attempt {attempt}; starting fresh results");
            remove_if_exists(&self.results)?;
            std::fs::write(&self.attempt, attempt)
                .map_err(|e| HookError::io(&self.attempt, e))?;
        }
        Ok(())
    }
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Removed previous results {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(HookError::io(path, e)),
    }
}
