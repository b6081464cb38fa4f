//! Scan results persistence and batch merging.
//!
//! The hook framework may split one commit's files across several hook
//! invocations. Each batch's results are overlaid onto the accumulated
//! results file keyed by file path, so the final inspection sees every batch.

mod layout;

pub use layout::{
    DEFAULT_RESULTS_DIR, DEFAULT_RESULTS_FILENAME, DEFAULT_TEMP_FILENAME, ResultsLayout,
};

use crate::error::{HookError, Result};
use indexmap::IndexMap;
use std::path::Path;

/// Scan results keyed by file path. Record contents are kept verbatim.
pub type ResultsMap = IndexMap<String, serde_json::Value>;

/// What [`merge_into`] did with a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// No temporary results file existed
    NoBatch,
    /// The batch was malformed and ignored
    Skipped,
    /// The batch was merged and written
    Merged {
        /// Entries in the batch
        batch: usize,
        /// Entries in the accumulated file after the merge
        total: usize,
    },
}

/// Overlay `batch` onto `acc`; entries from `batch` win on conflicting paths.
pub fn merge_batch(acc: &mut ResultsMap, batch: ResultsMap) {
    for (path, record) in batch {
        acc.insert(path, record);
    }
}

/// Parse a results document.
pub fn parse_results(content: &str) -> std::result::Result<ResultsMap, serde_json::Error> {
    serde_json::from_str(content)
}

/// Load the accumulated results, treating a missing or malformed file as empty.
#[must_use]
pub fn load_results(path: &Path) -> ResultsMap {
    let Ok(content) = std::fs::read_to_string(path) else {
        return ResultsMap::new();
    };
    match parse_results(&content) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(
                "Ignoring malformed results file {}: {e}",
                path.display()
            );
            ResultsMap::new()
        }
    }
}

/// Serialize results the way they are stored on disk (2-space indent).
pub fn to_pretty_json(results: &ResultsMap) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Merge the batch at `temp_path` into the accumulated file at `results_path`.
///
/// A malformed batch is logged and skipped, leaving the accumulated file
/// untouched. On success the temporary file is removed.
pub fn merge_into(results_path: &Path, temp_path: &Path) -> Result<MergeOutcome> {
    let batch_content = match std::fs::read_to_string(temp_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No batch results at {}", temp_path.display());
            return Ok(MergeOutcome::NoBatch);
        }
        Err(e) => return Err(HookError::io(temp_path, e)),
    };

    let batch = match parse_results(&batch_content) {
        Ok(batch) => batch,
        Err(e) => {
            tracing::error!("Error parsing temporary results: {e}");
            return Ok(MergeOutcome::Skipped);
        }
    };

    let mut combined = load_results(results_path);
    let batch_len = batch.len();
    merge_batch(&mut combined, batch);

    let json = to_pretty_json(&combined)?;
    std::fs::write(results_path, json).map_err(|e| HookError::io(results_path, e))?;

    if let Err(e) = std::fs::remove_file(temp_path)
        && e.kind() != std::io::ErrorKind::NotFound
    {
        tracing::warn!("Failed to remove {}: {e}", temp_path.display());
    }

    tracing::debug!(
        "Merged {batch_len} results into {} ({} total)",
        results_path.display(),
        combined.len()
    );
    Ok(MergeOutcome::Merged {
        batch: batch_len,
        total: combined.len(),
    })
}
