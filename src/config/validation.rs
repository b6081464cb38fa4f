//! Configuration validation for oss-hooks.
//!
//! Provides validation traits and implementations for all configuration types.

use super::types::{HookConfig, NetworkConfig, OutputConfig, ScannerConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for HookConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.scanner.validate());
        errors.extend(self.network.validate());
        errors.extend(self.output.validate());
        errors
    }
}

impl Validatable for ScannerConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.program.trim().is_empty() {
            errors.push(ConfigError::new(
                "scanner.program",
                "Scanner program must not be empty",
            ));
        }
        if self.settings_file.as_os_str().is_empty() {
            errors.push(ConfigError::new(
                "scanner.settings_file",
                "Settings file name must not be empty",
            ));
        }
        if self.legacy_sbom_file.as_os_str().is_empty() {
            errors.push(ConfigError::new(
                "scanner.legacy_sbom_file",
                "Legacy SBOM file name must not be empty",
            ));
        }
        errors
    }
}

impl Validatable for NetworkConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if let Some(url) = &self.api_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            errors.push(ConfigError::new(
                "network.api_url",
                format!("API URL '{url}' must start with http:// or https://"),
            ));
        }
        if let Some(proxy) = &self.proxy
            && proxy.trim().is_empty()
        {
            errors.push(ConfigError::new(
                "network.proxy",
                "Proxy must not be empty when set",
            ));
        }
        errors
    }
}

impl Validatable for OutputConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.results_file.file_name().is_none() {
            errors.push(ConfigError::new(
                "output.results_file",
                format!(
                    "Results path '{}' must name a file",
                    self.results_file.display()
                ),
            ));
        }
        errors
    }
}
