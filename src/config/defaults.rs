//! Default values for hook configuration.

/// Scanner executable invoked for `scan` and `results`
pub const DEFAULT_SCANNER_PROGRAM: &str = "scanoss-py";

/// Settings file declaring known components
pub const DEFAULT_SETTINGS_FILE: &str = "scanoss.json";

/// Legacy SBOM identify file
pub const DEFAULT_LEGACY_SBOM_FILE: &str = "SBOM.json";

/// Fingerprint size passed alongside the legacy identify file
pub const DEFAULT_LEGACY_SKIP_SIZE: u32 = 0;

/// Environment variable enabling debug output when set to `true`
pub const DEBUG_ENV_VAR: &str = "SCANOSS_DEBUG";

/// Parse the debug environment flag the way the scanner does: case-insensitive `true`.
#[must_use]
pub fn debug_from_env_value(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
