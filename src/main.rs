//! oss-hooks: pre-commit hooks for open source software detection
//!
//! Runs the SCANOSS scanner over staged or framework-provided files and fails
//! the commit while undeclared matches are pending review.

#![allow(clippy::struct_excessive_bools, clippy::needless_pass_by_value)]

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use oss_hooks::{
    cli,
    config::{
        CONFIG_FILE_NAMES, DEBUG_ENV_VAR, HookConfig, NetworkConfig, OutputConfig,
        config_search_dirs, debug_from_env_value, discover_config_file, generate_full_example_config,
        generate_json_schema, load_or_default,
    },
    scanner::MissingBomPolicy,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable consulted for the CA bundle when `REQUESTS_CA_BUNDLE` is unset
const GRPC_CA_ENV_VAR: &str = "GRPC_DEFAULT_SSL_ROOTS_FILE_PATH";

#[derive(Parser)]
#[command(name = "oss-hooks")]
#[command(version)]
#[command(about = "Pre-commit hooks that detect undeclared open source software", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  No pending results, or nothing to scan
    1  Pending results found, or the scan failed
    N  Propagated from a failing 'results' subcommand

EXAMPLES:
    # Check staged files
    oss-hooks undeclared

    # Check files passed by the pre-commit framework, merging batches
    oss-hooks scan-files --accumulate src/a.js src/b.js")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output (also respects `NO_COLOR` env)
    #[arg(long, global = true)]
    no_color: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

// ============================================================================
// Command argument structs
// ============================================================================

/// Scanner options shared by both hooks
#[derive(Args)]
struct ScanArgs {
    /// SCANOSS API URL
    #[arg(long, env = "SCANOSS_SCAN_URL")]
    api_url: Option<String>,

    /// SCANOSS API key
    #[arg(long, env = "SCANOSS_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Proxy URL to use for connections
    #[arg(long, env = "HTTPS_PROXY", hide_env_values = true)]
    proxy: Option<String>,

    /// Proxy auto configuration: a file, http url or "auto"
    #[arg(long)]
    pac: Option<String>,

    /// Alternative certificate PEM file (also GRPC_DEFAULT_SSL_ROOTS_FILE_PATH)
    #[arg(long, env = "REQUESTS_CA_BUNDLE")]
    ca_cert: Option<String>,

    /// Ignore certificate errors
    #[arg(long)]
    ignore_cert_errors: bool,

    /// Use REST instead of gRPC
    #[arg(long)]
    rest: bool,

    /// Output file for scan results (default: .scanoss/results.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable debug messages (also SCANOSS_DEBUG=true)
    #[arg(short, long)]
    debug: bool,

    /// Merge into existing results instead of replacing them
    #[arg(long)]
    accumulate: bool,

    /// Settings file to use instead of scanoss.json / SBOM.json discovery
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Behaviour when no settings or SBOM file exists
    #[arg(long, value_enum)]
    bom_policy: Option<MissingBomPolicy>,
}

impl ScanArgs {
    fn debug_enabled(&self) -> bool {
        self.debug || debug_from_env_value(std::env::var(DEBUG_ENV_VAR).ok().as_deref())
    }

    /// CLI values as a config layer for [`HookConfig::merge`].
    fn overrides(&self, no_color: bool) -> HookConfig {
        let mut config = HookConfig {
            network: NetworkConfig {
                api_url: self.api_url.clone(),
                proxy: self.proxy.clone(),
                pac: self.pac.clone(),
                ca_cert: self
                    .ca_cert
                    .clone()
                    .or_else(|| std::env::var(GRPC_CA_ENV_VAR).ok()),
                ignore_cert_errors: self.ignore_cert_errors,
                rest: self.rest,
            },
            output: OutputConfig {
                accumulate: self.accumulate,
                no_color,
                ..OutputConfig::default()
            },
            debug: self.debug_enabled(),
            api_key: self.api_key.clone(),
            ..HookConfig::default()
        };
        if let Some(output) = &self.output {
            config.output.results_file.clone_from(output);
        }
        config
    }

    /// Effective configuration: file settings with CLI values layered on top.
    fn resolve(&self, config_path: Option<&std::path::Path>, no_color: bool) -> HookConfig {
        let (mut config, loaded_from) =
            HookConfig::from_file_with_overrides(config_path, &self.overrides(no_color));
        if let Some(path) = loaded_from {
            tracing::debug!("Loaded config from {}", path.display());
        }
        if let Some(policy) = self.bom_policy {
            config.scanner.bom_policy = policy;
        }
        config
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Scan files staged in git for undeclared open source software
    Undeclared {
        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Scan the given files, accumulating results across batches
    ScanFiles {
        /// Files to scan
        files: Vec<PathBuf>,

        #[command(flatten)]
        scan: ScanArgs,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Show, discover, or initialize configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Sub-subcommands for the `config` command
#[derive(Subcommand)]
enum ConfigAction {
    /// Print current effective configuration (merged from defaults + file)
    Show,
    /// Print config file search paths and discovered config file
    Path,
    /// Generate an example .oss-hooks.yaml in the current directory
    Init,
    /// Print the JSON Schema for the config file format
    Schema {
        /// Write schema to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn exit_with(code: i32) -> Result<()> {
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let debug = cli.verbose
        || match &cli.command {
            Commands::Undeclared { scan } | Commands::ScanFiles { scan, .. } => {
                scan.debug_enabled()
            }
            _ => false,
        };
    init_logging(debug);

    match cli.command {
        Commands::Undeclared { scan } => {
            let config = scan.resolve(cli.config.as_deref(), cli.no_color);
            exit_with(cli::run_undeclared(&config, scan.settings.clone())?)
        }

        Commands::ScanFiles { files, scan } => {
            let config = scan.resolve(cli.config.as_deref(), cli.no_color);
            exit_with(cli::run_scan_files(
                &config,
                &files,
                scan.settings.clone(),
            )?)
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "oss-hooks", &mut io::stdout());
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let (config, loaded_from) = load_or_default(cli.config.as_deref());
                if let Some(path) = &loaded_from {
                    eprintln!("# Loaded from: {}", path.display());
                } else {
                    eprintln!("# No config file found; showing defaults");
                }
                let yaml =
                    serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(())
            }
            ConfigAction::Path => {
                eprintln!("Config file search paths (in order):");
                for dir in config_search_dirs() {
                    eprintln!("  {}", dir.display());
                }
                eprintln!();
                eprintln!("Recognized file names:");
                for name in CONFIG_FILE_NAMES {
                    eprintln!("  {name}");
                }
                eprintln!();
                match discover_config_file(cli.config.as_deref()) {
                    Some(path) => eprintln!("Active config file: {}", path.display()),
                    None => eprintln!("No config file found."),
                }
                Ok(())
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(CONFIG_FILE_NAMES[0]);
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, generate_full_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Created {}", target.display());
                Ok(())
            }
            ConfigAction::Schema { output } => {
                let schema = generate_json_schema().context("failed to serialize schema")?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => println!("{schema}"),
                }
                Ok(())
            }
        },
    }
}
