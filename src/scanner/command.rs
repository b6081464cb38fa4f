//! Scanner command-line construction.
//!
//! [`ScanCommand`] is an ordered token list. Optional flags are appended by a
//! fluent builder; the list is only ever logged through [`redact_args`].

use super::identify::Identification;
use std::fmt;
use std::path::Path;

/// Mask written in place of sensitive flag values.
pub const REDACTED: &str = "*****";

/// Flags whose values must never reach the logs. Proxy URLs may embed credentials.
const SENSITIVE_FLAGS: &[&str] = &["--key", "--api-key", "--proxy"];

/// Network and transport options forwarded to the scanner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOptions {
    /// API endpoint (`--apiurl`)
    pub api_url: Option<String>,
    /// API key (`--key`)
    pub api_key: Option<String>,
    /// Proxy URL (`--proxy`)
    pub proxy: Option<String>,
    /// Proxy auto-configuration (`--pac`)
    pub pac: Option<String>,
    /// Alternative CA bundle (`--ca-cert`)
    pub ca_cert: Option<String>,
    /// Skip TLS verification
    pub ignore_cert_errors: bool,
    /// Use REST instead of gRPC
    pub rest: bool,
    /// Scanner debug output
    pub debug: bool,
}

/// An external scanner invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanCommand {
    program: String,
    args: Vec<String>,
}

impl ScanCommand {
    /// Start a `scan` invocation that never writes fingerprint files.
    #[must_use]
    pub fn scan(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec!["scan".to_string(), "--no-wfp-output".to_string()],
        }
    }

    /// Start a `results` invocation asking for pending entries as JSON.
    #[must_use]
    pub fn pending_results(program: impl Into<String>, results_path: &Path) -> Self {
        Self {
            program: program.into(),
            args: vec![
                "results".to_string(),
                results_path.display().to_string(),
                "--has-pending".to_string(),
                "--format".to_string(),
                "json".to_string(),
            ],
        }
    }

    /// Append a bare flag.
    #[must_use]
    pub fn flag(mut self, flag: &str) -> Self {
        self.args.push(flag.to_string());
        self
    }

    /// Append `flag value` when `value` is set.
    #[must_use]
    pub fn opt(mut self, flag: &str, value: Option<&str>) -> Self {
        if let Some(value) = value {
            self.args.push(flag.to_string());
            self.args.push(value.to_string());
        }
        self
    }

    /// Append the identification flags chosen for this run.
    #[must_use]
    pub fn identification(mut self, identification: &Identification) -> Self {
        self.args.extend(identification.to_args());
        self
    }

    /// Append network, transport and debug options.
    #[must_use]
    pub fn options(self, options: &ScanOptions) -> Self {
        let mut cmd = self
            .opt("--apiurl", options.api_url.as_deref())
            .opt("--key", options.api_key.as_deref())
            .opt("--proxy", options.proxy.as_deref())
            .opt("--pac", options.pac.as_deref())
            .opt("--ca-cert", options.ca_cert.as_deref());
        if options.debug {
            cmd = cmd.flag("--debug");
        }
        if options.ignore_cert_errors {
            cmd = cmd.flag("--ignore-cert-errors");
        }
        if options.rest {
            cmd = cmd.flag("--rest");
        }
        cmd
    }

    /// Ask the scanner to write its results to `path`.
    #[must_use]
    pub fn output(self, path: &Path) -> Self {
        let path = path.display().to_string();
        self.opt("--output", Some(&path))
    }

    /// Append `--files` followed by every target path.
    #[must_use]
    pub fn files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args.push("--files".to_string());
        self.args
            .extend(files.into_iter().map(|f| f.as_ref().to_string()));
        self
    }

    /// Program to execute
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments, unredacted, exactly as they will be executed
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Full argv with secrets masked, safe for logging.
    #[must_use]
    pub fn redacted(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        argv.push(self.program.clone());
        argv.extend(redact_args(&self.args));
        argv
    }
}

impl fmt::Display for ScanCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.redacted().join(" "))
    }
}

/// Return a copy of `args` with sensitive flag values masked.
///
/// Handles both `--key value` and `--key=value` spellings.
#[must_use]
pub fn redact_args(args: &[String]) -> Vec<String> {
    let mut sanitized = args.to_vec();

    for (i, arg) in args.iter().enumerate() {
        for flag in SENSITIVE_FLAGS {
            if arg == flag {
                if let Some(next) = sanitized.get_mut(i + 1) {
                    *next = REDACTED.to_string();
                }
            } else if arg
                .strip_prefix(flag)
                .is_some_and(|rest| rest.starts_with('='))
            {
                sanitized[i] = format!("{flag}={REDACTED}");
            }
        }
    }
    sanitized
}
