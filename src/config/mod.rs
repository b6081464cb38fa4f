//! Configuration module for oss-hooks.
//!
//! This module provides:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use oss_hooks::config::{HookConfig, load_or_default};
//!
//! let (mut config, loaded_from) = load_or_default(None);
//! config.merge(&cli_overrides);
//! ```
//!
//! # Configuration File
//!
//! Place a `.oss-hooks.yaml` file in your repository root or `~/.config/oss-hooks/`:
//!
//! ```yaml
//! scanner:
//!   bom_policy: fail
//! network:
//!   api_url: https://scan.example.com
//! output:
//!   accumulate: true
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    DEBUG_ENV_VAR, DEFAULT_LEGACY_SBOM_FILE, DEFAULT_LEGACY_SKIP_SIZE, DEFAULT_SCANNER_PROGRAM,
    DEFAULT_SETTINGS_FILE, debug_from_env_value,
};
pub use types::{HookConfig, NetworkConfig, OutputConfig, ScannerConfig};
pub use validation::{ConfigError, Validatable};

pub use file::{
    CONFIG_FILE_NAMES, ConfigFileError, config_search_dirs, discover_config_file,
    find_git_root, generate_full_example_config, load_config_file, load_or_default,
};

/// Generate a JSON Schema for the `HookConfig` configuration format.
///
/// Editors can use it to validate and complete `.oss-hooks.yaml` files.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(HookConfig);
    serde_json::to_string_pretty(&schema)
}
