//! Configuration types for the hooks.

use super::defaults::{
    DEFAULT_LEGACY_SBOM_FILE, DEFAULT_LEGACY_SKIP_SIZE, DEFAULT_SCANNER_PROGRAM,
    DEFAULT_SETTINGS_FILE,
};
use crate::results::{DEFAULT_RESULTS_DIR, DEFAULT_RESULTS_FILENAME, ResultsLayout};
use crate::scanner::{MissingBomPolicy, ScanOptions};
use crate::staged::DiffFilter;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ============================================================================
// Unified Hook Configuration
// ============================================================================

/// Top-level configuration, loaded from a config file and overridden by CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HookConfig {
    /// Scanner program and identification settings
    pub scanner: ScannerConfig,
    /// Network and transport options
    pub network: NetworkConfig,
    /// Results files and terminal output
    pub output: OutputConfig,
    /// Enable debug logging and scanner debug output
    pub debug: bool,
    /// API key. Only ever set from the CLI or environment.
    #[serde(skip)]
    #[schemars(skip)]
    pub api_key: Option<String>,
}

impl HookConfig {
    /// Scanner options derived from this configuration.
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            api_url: self.network.api_url.clone(),
            api_key: self.api_key.clone(),
            proxy: self.network.proxy.clone(),
            pac: self.network.pac.clone(),
            ca_cert: self.network.ca_cert.clone(),
            ignore_cert_errors: self.network.ignore_cert_errors,
            rest: self.network.rest,
            debug: self.debug,
        }
    }

    /// Results layout derived from the output settings.
    #[must_use]
    pub fn layout(&self) -> ResultsLayout {
        ResultsLayout::for_results_file(&self.output.results_file)
    }

    /// Whether the results file is the default location.
    #[must_use]
    pub fn is_default_results_file(&self) -> bool {
        self.output.results_file == OutputConfig::default().results_file
    }
}

/// Scanner program and identification file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ScannerConfig {
    /// Scanner executable
    pub program: String,
    /// Settings file used for identification when present
    pub settings_file: PathBuf,
    /// Legacy SBOM identify file, used when no settings file exists
    pub legacy_sbom_file: PathBuf,
    /// Fingerprint size passed with the legacy identify file
    pub legacy_skip_size: u32,
    /// What to do when neither identification file exists
    pub bom_policy: MissingBomPolicy,
    /// Which staged changes are scanned
    pub diff_filter: DiffFilter,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_SCANNER_PROGRAM.to_string(),
            settings_file: PathBuf::from(DEFAULT_SETTINGS_FILE),
            legacy_sbom_file: PathBuf::from(DEFAULT_LEGACY_SBOM_FILE),
            legacy_skip_size: DEFAULT_LEGACY_SKIP_SIZE,
            bom_policy: MissingBomPolicy::default(),
            diff_filter: DiffFilter::default(),
        }
    }
}

/// Network options forwarded to the scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct NetworkConfig {
    /// Scanner API URL
    pub api_url: Option<String>,
    /// Proxy URL
    pub proxy: Option<String>,
    /// Proxy auto-configuration: file, URL or "auto"
    pub pac: Option<String>,
    /// Alternative CA certificate bundle
    pub ca_cert: Option<String>,
    /// Ignore TLS certificate errors
    pub ignore_cert_errors: bool,
    /// Use REST instead of gRPC
    pub rest: bool,
}

/// Results file and terminal output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct OutputConfig {
    /// Where the accumulated results are written
    pub results_file: PathBuf,
    /// Merge into existing results instead of replacing them
    pub accumulate: bool,
    /// Disable colored output
    pub no_color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_file: PathBuf::from(DEFAULT_RESULTS_DIR).join(DEFAULT_RESULTS_FILENAME),
            accumulate: false,
            no_color: false,
        }
    }
}
