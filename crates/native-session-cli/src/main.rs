// crates/native-session-cli/src/main.rs
// ============================================================================
// Module: Native Session CLI
// Description: CLI entrypoint for inspecting and publishing session properties.
// Purpose: Render metadata, resolve engine configs, and manage the contract.
// Dependencies: clap, native-session-cli, native-session-config
// ============================================================================

//! ## Overview
//! `native-session` loads the tooling configuration and runs one command:
//! `metadata` prints the coordinator document, `resolve` prints the engine
//! config for a set of session overrides, and `generate` / `check` write or
//! verify the contract bundle.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use native_session_cli::CliError;
use native_session_cli::CliResult;
use native_session_cli::check_contract;
use native_session_cli::generate_contract;
use native_session_cli::metadata_document;
use native_session_cli::parse_assignment;
use native_session_cli::render_engine_config;
use native_session_cli::resolve_engine_config;
use native_session_config::NativeSessionConfig;

// ============================================================================
// SECTION: CLI Definition
// ============================================================================

/// Native session CLI arguments.
#[derive(Debug, Parser)]
#[command(name = "native-session", about = "Inspect and publish native session properties.")]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// Supported CLI subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Print the session property metadata document.
    Metadata {
        /// Emit RFC 8785 canonical JSON instead of pretty output.
        #[arg(long)]
        canonical: bool,
    },
    /// Print the engine config for the given session overrides.
    Resolve {
        /// Session override as `name=value`; repeatable, later entries win.
        #[arg(long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
    },
    /// Generate the contract artifacts.
    Generate {
        /// Output directory for generated artifacts.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Verify on-disk artifacts match the generated contract.
    Check {
        /// Output directory containing generated artifacts.
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
}

// ============================================================================
// SECTION: CLI Execution
// ============================================================================

/// CLI entrypoint.
fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => report_error(&err),
    }
}

/// Executes the CLI command.
fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = NativeSessionConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Metadata {
            canonical,
        } => write_stdout(&metadata_document(&config, canonical)?),
        Command::Resolve {
            set,
        } => {
            let overrides =
                set.iter().map(|entry| parse_assignment(entry)).collect::<CliResult<Vec<_>>>()?;
            let resolved = resolve_engine_config(&config, &overrides)?;
            write_stdout(&render_engine_config(&resolved)?)
        }
        Command::Generate {
            out,
        } => {
            let manifest = generate_contract(&config, out.as_deref())?;
            write_line(&format!(
                "wrote {} artifacts for {} properties",
                manifest.artifacts.len(),
                manifest.property_count
            ))
        }
        Command::Check {
            out,
        } => {
            let checked = check_contract(&config, out.as_deref())?;
            write_line(&format!("contract at {} is up to date", checked.display()))
        }
    }
}

/// Reports CLI errors to stderr and returns a failure exit code.
fn report_error(err: &CliError) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(stderr, "{err}");
    ExitCode::FAILURE
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes raw bytes to stdout.
fn write_stdout(bytes: &[u8]) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes).map_err(|err| CliError::Output(err.to_string()))?;
    stdout.flush().map_err(|err| CliError::Output(err.to_string()))
}

/// Writes a single status line to stdout.
fn write_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{message}").map_err(|err| CliError::Output(err.to_string()))
}
