//! External scanner invocation.
//!
//! All child processes go through [`ProcessRunner`] so the hook driver can be
//! exercised without the real scanner or git installed.

mod command;
mod identify;

pub use command::{REDACTED, ScanCommand, ScanOptions, redact_args};
pub use identify::{Identification, MissingBomPolicy, resolve_identification};

use crate::error::{HookError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured result of a finished child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if terminated by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with code 0
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.code, Some(0))
    }
}

/// Runs a program to completion and captures its output.
pub trait ProcessRunner {
    /// Run `program` with `args`, blocking until it exits.
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<ProcessOutput>;
}

/// [`ProcessRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[String]) -> std::io::Result<ProcessOutput> {
        let output = Command::new(program).args(args).output()?;
        Ok(ProcessOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Where the scan results should end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutput {
    /// Pass `--output <path>`; the scanner writes the file itself
    Flag(PathBuf),
    /// Capture stdout and write it to the path
    Capture(PathBuf),
}

/// Runs scanner subcommands through a [`ProcessRunner`].
pub struct Scanner<'a, R: ProcessRunner + ?Sized> {
    runner: &'a R,
}

impl<'a, R: ProcessRunner + ?Sized> Scanner<'a, R> {
    pub const fn new(runner: &'a R) -> Self {
        Self { runner }
    }

    /// Execute a command, logging only its redacted form.
    pub fn execute(&self, command: &ScanCommand) -> Result<ProcessOutput> {
        tracing::debug!("Executing command: {command}");
        self.runner
            .run(command.program(), command.args())
            .map_err(|e| HookError::spawn(command.program(), e))
    }

    /// Run a scan, treating any non-zero exit as fatal.
    pub fn run_scan(&self, command: ScanCommand, output: &ScanOutput) -> Result<()> {
        let command = match output {
            ScanOutput::Flag(path) => command.output(path),
            ScanOutput::Capture(_) => command,
        };

        let result = self.execute(&command)?;
        if !result.success() {
            let code = result.code.unwrap_or(1);
            tracing::error!(
                "Error running scanner command with return code {code}: {}",
                result.stderr.trim()
            );
            return Err(HookError::ScanFailed {
                code,
                stderr: result.stderr,
            });
        }

        for line in progress_lines(&result.stderr) {
            tracing::debug!("scanner: {line}");
        }
        match output {
            ScanOutput::Flag(_) => {
                for line in progress_lines(&result.stdout) {
                    tracing::debug!("scanner: {line}");
                }
            }
            ScanOutput::Capture(path) => write_captured(path, &result.stdout)?,
        }
        Ok(())
    }
}

/// Non-blank lines of scanner console output.
fn progress_lines(output: &str) -> impl Iterator<Item = &str> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
}

fn write_captured(path: &Path, stdout: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tracing::debug!("Ensuring output directory exists: {}", parent.display());
        std::fs::create_dir_all(parent).map_err(|e| HookError::io(parent, e))?;
    }
    std::fs::write(path, stdout).map_err(|e| HookError::io(path, e))?;
    tracing::debug!("Scan results saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct Canned {
        output: ProcessOutput,
        seen: RefCell<Vec<Vec<String>>>,
    }

    impl ProcessRunner for Canned {
        fn run(&self, program: &str, args: &[String]) -> std::io::Result<ProcessOutput> {
            let mut argv = vec![program.to_string()];
            argv.extend(args.iter().cloned());
            self.seen.borrow_mut().push(argv);
            Ok(self.output.clone())
        }
    }

    fn canned(code: i32, stdout: &str, stderr: &str) -> Canned {
        Canned {
            output: ProcessOutput {
                code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            },
            seen: RefCell::new(Vec::new()),
        }
    }

    #[test]
    fn test_capture_writes_stdout_and_creates_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("results.json");
        let runner = canned(0, r#"{"a.js":[]}"#, "");

        Scanner::new(&runner)
            .run_scan(ScanCommand::scan("scanoss-py"), &ScanOutput::Capture(path.clone()))
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), r#"{"a.js":[]}"#);
        let seen = runner.seen.borrow();
        assert!(!seen[0].contains(&"--output".to_string()));
    }

    #[test]
    fn test_flag_output_appends_output_arg() {
        let runner = canned(0, "", "");
        let path = PathBuf::from(".scanoss/temp_results.json");

        Scanner::new(&runner)
            .run_scan(ScanCommand::scan("scanoss-py"), &ScanOutput::Flag(path))
            .unwrap();

        let seen = runner.seen.borrow();
        let argv = &seen[0];
        let idx = argv.iter().position(|a| a == "--output").unwrap();
        assert_eq!(argv[idx + 1], ".scanoss/temp_results.json");
    }

    #[test]
    fn test_nonzero_exit_is_scan_failed() {
        let runner = canned(3, "", "unauthorized");
        let err = Scanner::new(&runner)
            .run_scan(
                ScanCommand::scan("scanoss-py"),
                &ScanOutput::Flag(PathBuf::from("out.json")),
            )
            .unwrap_err();
        match err {
            HookError::ScanFailed { code, stderr } => {
                assert_eq!(code, 3);
                assert_eq!(stderr, "unauthorized");
            }
            other => panic!("Expected ScanFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_executed_args_are_not_redacted() {
        let runner = canned(0, "", "");
        let cmd = ScanCommand::scan("scanoss-py").opt("--key", Some("secret123"));
        Scanner::new(&runner).execute(&cmd).unwrap();
        assert!(runner.seen.borrow()[0].contains(&"secret123".to_string()));
    }

    #[test]
    fn test_flag_mode_keeps_scanner_console_output() {
        let runner = canned(0, "Scanning 2 files...\n\n  done\n", "");
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("temp_results.json");

        Scanner::new(&runner)
            .run_scan(ScanCommand::scan("scanoss-py"), &ScanOutput::Flag(path.clone()))
            .unwrap();

        assert!(!path.exists());
        let lines: Vec<&str> = progress_lines(&runner.output.stdout).collect();
        assert_eq!(lines, ["Scanning 2 files...", "  done"]);
    }

    #[test]
    fn test_signal_termination_is_not_success() {
        let out = ProcessOutput {
            code: None,
            ..ProcessOutput::default()
        };
        assert!(!out.success());
    }
}
