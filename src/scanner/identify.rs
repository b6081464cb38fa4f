//! Identification (settings / BOM) file selection.
//!
//! A settings file takes precedence over the legacy SBOM identify file.
//! What happens when neither exists is governed by [`MissingBomPolicy`].

use crate::config::ScannerConfig;
use crate::error::{HookError, Result};
use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Behaviour when no identification file can be found.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum MissingBomPolicy {
    /// Scan without identification and log a warning
    #[default]
    Disable,
    /// Abort the hook
    Fail,
}

impl std::fmt::Display for MissingBomPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disable => write!(f, "disable"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// Identification flags chosen for a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identification {
    /// `--settings <path>`
    Settings(PathBuf),
    /// `--identify <path> --skip-size <n>`
    LegacyIdentify { path: PathBuf, skip_size: u32 },
    /// No identification
    Disabled,
}

impl Identification {
    /// Scanner arguments for this identification mode.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        match self {
            Self::Settings(path) => vec!["--settings".to_string(), path.display().to_string()],
            Self::LegacyIdentify { path, skip_size } => vec![
                "--identify".to_string(),
                path.display().to_string(),
                "--skip-size".to_string(),
                skip_size.to_string(),
            ],
            Self::Disabled => Vec::new(),
        }
    }
}

fn under(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Pick the identification file for a scan rooted at `root`.
///
/// Order: explicit `settings` override, the default settings file, then the
/// legacy SBOM file.
pub fn resolve_identification(
    root: &Path,
    config: &ScannerConfig,
    explicit: Option<&Path>,
) -> Result<Identification> {
    let mut looked_for = Vec::new();

    if let Some(explicit) = explicit {
        let path = under(root, explicit);
        if path.is_file() {
            tracing::debug!("Using settings file {}", path.display());
            return Ok(Identification::Settings(path));
        }
        tracing::warn!("Settings file {} does not exist", path.display());
        looked_for.push(path);
    } else {
        let settings = under(root, &config.settings_file);
        if settings.is_file() {
            tracing::debug!("Using settings file {}", settings.display());
            return Ok(Identification::Settings(settings));
        }
        looked_for.push(settings);

        let legacy = under(root, &config.legacy_sbom_file);
        if legacy.is_file() {
            tracing::debug!("Using legacy identify file {}", legacy.display());
            return Ok(Identification::LegacyIdentify {
                path: legacy,
                skip_size: config.legacy_skip_size,
            });
        }
        looked_for.push(legacy);
    }

    let looked_for = looked_for
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    match config.bom_policy {
        MissingBomPolicy::Disable => {
            tracing::warn!("No identification file found ({looked_for}); scanning without it");
            Ok(Identification::Disabled)
        }
        MissingBomPolicy::Fail => Err(HookError::MissingBom { looked_for }),
    }
}
