//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::HookConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".oss-hooks.yaml",
    ".oss-hooks.yml",
    "oss-hooks.yaml",
    "oss-hooks.yml",
];

/// Directory name under the user config directory.
const USER_CONFIG_DIR: &str = "oss-hooks";

/// Directories searched for a config file, in order.
///
/// 1. Current directory
/// 2. Git repository root (if in a repo)
/// 3. User config directory (~/.config/oss-hooks/)
/// 4. Home directory
#[must_use]
pub fn config_search_dirs() -> Vec<PathBuf> {
    let mut search = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        search.push(cwd);
    }
    if let Some(git_root) = find_git_root()
        && !search.contains(&git_root)
    {
        search.push(git_root);
    }
    if let Some(config_dir) = dirs::config_dir() {
        search.push(config_dir.join(USER_CONFIG_DIR));
    }
    if let Some(home) = dirs::home_dir() {
        search.push(home);
    }
    search
}

/// Discover a config file: the explicit path if it exists, else the first
/// match in [`config_search_dirs`].
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    config_search_dirs()
        .iter()
        .find_map(|dir| find_config_in_dir(dir))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
pub fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml_ng::Error),
}

/// Load a `HookConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<HookConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: HookConfig = serde_yaml_ng::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (HookConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (HookConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (HookConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl HookConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults override, so CLI arguments
    /// that were not given leave file settings in place.
    pub fn merge(&mut self, other: &Self) {
        let scanner_defaults = super::ScannerConfig::default();

        // Scanner config
        if other.scanner.program != scanner_defaults.program {
            self.scanner.program.clone_from(&other.scanner.program);
        }
        if other.scanner.settings_file != scanner_defaults.settings_file {
            self.scanner
                .settings_file
                .clone_from(&other.scanner.settings_file);
        }
        if other.scanner.bom_policy != scanner_defaults.bom_policy {
            self.scanner.bom_policy = other.scanner.bom_policy;
        }
        if other.scanner.diff_filter != scanner_defaults.diff_filter {
            self.scanner.diff_filter = other.scanner.diff_filter;
        }

        // Network config
        let network = &other.network;
        if network.api_url.is_some() {
            self.network.api_url.clone_from(&network.api_url);
        }
        if network.proxy.is_some() {
            self.network.proxy.clone_from(&network.proxy);
        }
        if network.pac.is_some() {
            self.network.pac.clone_from(&network.pac);
        }
        if network.ca_cert.is_some() {
            self.network.ca_cert.clone_from(&network.ca_cert);
        }
        if network.ignore_cert_errors {
            self.network.ignore_cert_errors = true;
        }
        if network.rest {
            self.network.rest = true;
        }

        // Output config
        if !other.is_default_results_file() {
            self.output
                .results_file
                .clone_from(&other.output.results_file);
        }
        if other.output.accumulate {
            self.output.accumulate = true;
        }
        if other.output.no_color {
            self.output.no_color = true;
        }

        if other.debug {
            self.debug = true;
        }
        if other.api_key.is_some() {
            self.api_key.clone_from(&other.api_key);
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# oss-hooks configuration
# ======================
#
# Place this file at .oss-hooks.yaml in your repository root or at
# ~/.config/oss-hooks/oss-hooks.yaml for a global default.
#
# CLI arguments always override file settings. The API key is only read
# from --api-key or SCANOSS_API_KEY, never from this file.

scanner:
  # Scanner executable
  program: scanoss-py
  # Settings file passed with --settings when present
  settings_file: scanoss.json
  # Legacy identify file, used when the settings file is missing
  legacy_sbom_file: SBOM.json
  # Fingerprint size passed with the legacy identify file
  legacy_skip_size: 0
  # When no identification file exists: disable or fail
  bom_policy: disable
  # Staged changes to scan: added-copied-modified, with-renames,
  # with-renames-and-type-changes
  diff_filter: with-renames

network:
  # api_url: https://api.osskb.org
  # proxy: http://proxy.example.com:8080
  # pac: auto
  # ca_cert: /etc/ssl/certs/ca-bundle.crt
  ignore_cert_errors: false
  # Use REST instead of gRPC
  rest: false

output:
  # Accumulated results file; the temp batch file is written next to it
  results_file: .scanoss/results.json
  # Merge new batches into existing results instead of replacing them
  accumulate: false
  no_color: false

debug: false
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
