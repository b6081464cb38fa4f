//! Pending-result inspection and presentation.
//!
//! The scanner's `results --has-pending` subcommand signals through its exit
//! code: 0 means nothing pending, 1 means pending entries are on stdout, and
//! anything else is a tool failure. [`inspect_results`] turns that into an
//! [`InspectOutcome`].

mod table;

pub use table::PendingTable;

use crate::error::{HookError, Result};
use crate::scanner::{ProcessRunner, ScanCommand, Scanner};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use table::ansi_color;

/// Command suggested to review results interactively.
const REVIEW_COMMAND: &str = "scanoss-cc";

/// One file awaiting review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingEntry {
    #[serde(deserialize_with = "lenient_string")]
    pub file: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub match_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub matched: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub purl: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub license: Option<String>,
}

impl PendingEntry {
    /// Table cells in column order; missing values are empty.
    #[must_use]
    pub fn cells(&self) -> [&str; 6] {
        [
            self.file.as_deref().unwrap_or_default(),
            self.status.as_deref().unwrap_or_default(),
            self.match_type.as_deref().unwrap_or_default(),
            self.matched.as_deref().unwrap_or_default(),
            self.purl.as_deref().unwrap_or_default(),
            self.license.as_deref().unwrap_or_default(),
        ]
    }
}

/// Accept strings, numbers and booleans; treat null as missing.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Pending-only view of the results, as printed by the scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PendingReport {
    pub total: Option<u64>,
    pub results: Vec<PendingEntry>,
}

impl PendingReport {
    /// Reported total, falling back to the number of entries.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.total.unwrap_or(self.results.len() as u64)
    }
}

/// Typed result of the pending-results check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectOutcome {
    /// Nothing pending
    Clean,
    /// Pending entries need review
    Pending(PendingReport),
    /// The inspection tool itself failed
    ToolError { code: i32, message: String },
}

/// Decode the pending-results payload.
pub fn parse_pending(payload: &str) -> Result<PendingReport> {
    serde_json::from_str(payload).map_err(|e| HookError::InvalidPayload(e.to_string()))
}

/// Ask the scanner whether `results_path` has pending entries.
pub fn inspect_results<R: ProcessRunner + ?Sized>(
    runner: &R,
    program: &str,
    results_path: &Path,
) -> Result<InspectOutcome> {
    let command = ScanCommand::pending_results(program, results_path);
    let output = Scanner::new(runner).execute(&command)?;

    match output.code {
        Some(0) => Ok(InspectOutcome::Clean),
        Some(1) => {
            let report = parse_pending(&output.stdout).inspect_err(|_| {
                tracing::error!("Failed to parse JSON response from scanner");
            })?;
            Ok(InspectOutcome::Pending(report))
        }
        code => {
            let code = code.unwrap_or(1);
            tracing::error!(
                "Scanner 'results' command failed with exit code {code}: {}",
                output.stderr.trim()
            );
            Ok(InspectOutcome::ToolError {
                code,
                message: output.stderr,
            })
        }
    }
}

/// Determine if color should be used based on flags and environment
#[must_use]
pub fn should_use_color(no_color_flag: bool) -> bool {
    !no_color_flag && std::env::var_os("NO_COLOR").is_none()
}

/// Banner, table and review hint for pending results.
///
/// The hint names the results file only when it differs from `default_path`.
#[must_use]
pub fn render_pending(
    report: &PendingReport,
    results_path: &Path,
    default_path: &Path,
    colored: bool,
) -> String {
    let count = ansi_color(&report.count().to_string(), "cyan", colored);
    let banner = ansi_color(
        &format!("SCANOSS detected {count} files containing potential Open Source Software:"),
        "bold-red",
        colored,
    );

    let mut table = PendingTable::new(&report.results);
    if !colored {
        table = table.no_color();
    }

    let review = if results_path == default_path {
        REVIEW_COMMAND.to_string()
    } else {
        format!("{REVIEW_COMMAND} --input {}", results_path.display())
    };
    let hint = format!(
        "Run {} in the terminal to view the results in more detail.",
        ansi_color(&format!("'{review}'"), "green", colored)
    );

    [banner, table.render(), hint].join("\n")
}

/// Confirmation line printed when nothing is pending.
#[must_use]
pub fn render_clean(colored: bool) -> String {
    ansi_color(
        "✅ No pending results found. It's safe to commit.",
        "bold-green",
        colored,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ProcessOutput;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"{"total":1,"results":[{"file":"a.js","status":"pending","match_type":"snippet","matched":"80%","purl":"pkg:npm/foo","license":"MIT"}]}"#;

    struct Fixed(ProcessOutput);

    impl ProcessRunner for Fixed {
        fn run(&self, _program: &str, _args: &[String]) -> std::io::Result<ProcessOutput> {
            Ok(self.0.clone())
        }
    }

    fn fixed(code: Option<i32>, stdout: &str, stderr: &str) -> Fixed {
        Fixed(ProcessOutput {
            code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        })
    }

    #[test]
    fn test_parse_sample_payload() {
        let report = parse_pending(SAMPLE).unwrap();
        assert_eq!(report.count(), 1);
        assert_eq!(report.results[0].file.as_deref(), Some("a.js"));
        assert_eq!(report.results[0].matched.as_deref(), Some("80%"));
    }

    #[test]
    fn test_parse_tolerates_odd_field_types() {
        let report =
            parse_pending(r#"{"results":[{"file":"a.js","matched":80,"license":null}]}"#).unwrap();
        assert_eq!(report.count(), 1);
        assert_eq!(report.results[0].matched.as_deref(), Some("80"));
        assert_eq!(report.results[0].license, None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(matches!(
            parse_pending("Traceback (most recent call last)"),
            Err(HookError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_inspect_clean() {
        let outcome =
            inspect_results(&fixed(Some(0), "", ""), "scanoss-py", Path::new("r.json")).unwrap();
        assert_eq!(outcome, InspectOutcome::Clean);
    }

    #[test]
    fn test_inspect_pending() {
        let outcome =
            inspect_results(&fixed(Some(1), SAMPLE, ""), "scanoss-py", Path::new("r.json"))
                .unwrap();
        match outcome {
            InspectOutcome::Pending(report) => assert_eq!(report.count(), 1),
            other => panic!("Expected Pending, got {other:?}"),
        }
    }

    #[test]
    fn test_inspect_pending_bad_payload_is_error() {
        let err = inspect_results(&fixed(Some(1), "oops", ""), "scanoss-py", Path::new("r.json"))
            .unwrap_err();
        assert!(matches!(err, HookError::InvalidPayload(_)));
    }

    #[test]
    fn test_inspect_other_code_is_tool_error() {
        let outcome = inspect_results(
            &fixed(Some(2), "", "results file not found"),
            "scanoss-py",
            Path::new("r.json"),
        )
        .unwrap();
        assert_eq!(
            outcome,
            InspectOutcome::ToolError {
                code: 2,
                message: "results file not found".to_string()
            }
        );
    }

    #[test]
    fn test_inspect_signal_is_tool_error_one() {
        let outcome =
            inspect_results(&fixed(None, "", ""), "scanoss-py", Path::new("r.json")).unwrap();
        assert!(matches!(outcome, InspectOutcome::ToolError { code: 1, .. }));
    }

    #[test]
    fn test_render_pending_default_path() {
        let report = parse_pending(SAMPLE).unwrap();
        let default = PathBuf::from(".scanoss/results.json");
        let out = render_pending(&report, &default, &default, false);
        assert!(out.contains("SCANOSS detected 1 files"));
        assert!(out.contains("a.js"));
        assert!(out.contains("'scanoss-cc'"));
    }

    #[test]
    fn test_render_pending_custom_path() {
        let report = parse_pending(SAMPLE).unwrap();
        let out = render_pending(
            &report,
            Path::new("out/scan.json"),
            Path::new(".scanoss/results.json"),
            false,
        );
        assert!(out.contains("'scanoss-cc --input out/scan.json'"));
    }

    #[test]
    fn test_should_use_color_with_flag() {
        assert!(!should_use_color(true));
    }
}
