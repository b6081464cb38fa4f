//! CLI command handlers.
//!
//! Handlers are invoked by main.rs and return the process exit code; main is
//! responsible for calling `std::process::exit()` with it.

mod hooks;

pub use hooks::{print_outcome, render_outcome, run_scan_files, run_undeclared};
