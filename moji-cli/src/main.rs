//! Moji CLI - replaces `:short_codes:` in text with emoji.
//!
//! This is the main entry point for the moji CLI application.
//! It uses clap for argument parsing and dispatches to the command
//! handlers. Output goes to stdout; logs and errors go to stderr.

mod commands;
mod config;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{dispatch, FetchArgs, FetchCommand, ScanArgs, ScanCommand};
use config::Config;
use error::{MojiError, Result};

/// Moji - replace :short_codes: with emoji
///
/// Reads text, replaces every delimited short code such as `:thumbs_up:`
/// with the emoji whose CLDR text-to-speech name matches, and writes the
/// result to stdout.
#[derive(Parser, Debug)]
#[command(name = "moji")]
#[command(author = "Moji Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Replace :short_codes: in text with emoji", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true, env = "MOJI_VERBOSE")]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "MOJI_CONFIG")]
    config: Option<PathBuf>,

    /// Path to the reference table (overrides configuration)
    #[arg(short, long, global = true, env = "MOJI_TABLE")]
    table: Option<PathBuf>,

    /// Disable color output
    #[arg(long, global = true, env = "MOJI_NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the moji CLI.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace short codes in files or stdin
    ///
    /// Inputs are processed in order through one lookup cache and written
    /// to stdout. With no inputs, stdin is read.
    Scan(ScanCommandArgs),

    /// Download the reference table
    ///
    /// Fetches the latest CLDR annotations for the configured locale into
    /// the state directory, or to --table.
    Fetch(FetchCommandArgs),
}

/// Arguments for the scan subcommand.
#[derive(Parser, Debug)]
struct ScanCommandArgs {
    /// Input files (`-` for stdin)
    input: Vec<PathBuf>,

    /// Token delimiter character (default: from config, `:`)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Fail instead of downloading a missing reference table
    #[arg(long)]
    no_fetch: bool,
}

/// Arguments for the fetch subcommand.
#[derive(Parser, Debug)]
struct FetchCommandArgs {
    /// Download even if the table already exists
    #[arg(short, long)]
    force: bool,

    /// CLDR locale to download (default: from config, `en`)
    #[arg(short, long)]
    locale: Option<String>,
}

/// Main entry point for the moji CLI.
///
/// Any error is reported on stderr and turns into exit status 1.
fn main() {
    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(cli.verbose || config.verbose, cli.no_color)?;

    execute_command(cli.command, cli.table, config)
}

/// Initialize the logging system.
///
/// Logs are written to stderr so they never mix with scanned output.
fn init_logging(verbose: bool, no_color: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(verbose);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .map_err(|e| MojiError::Config(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(config_path: Option<&std::path::Path>) -> Result<Config> {
    match config_path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

/// Execute the selected command.
fn execute_command(command: Commands, table: Option<PathBuf>, mut config: Config) -> Result<()> {
    if table.is_some() {
        config.table.path = table;
    }

    match command {
        Commands::Scan(args) => execute_scan(args, config),
        Commands::Fetch(args) => execute_fetch(args, config),
    }
}

/// Execute the scan command.
fn execute_scan(args: ScanCommandArgs, config: Config) -> Result<()> {
    let scan_args = ScanArgs {
        inputs: args.input,
        delimiter: args.delimiter.unwrap_or(config.scan.delimiter),
        fetch: !args.no_fetch,
        table: config.table,
    };
    dispatch::<ScanCommand>(scan_args)?;
    Ok(())
}

/// Execute the fetch command.
fn execute_fetch(args: FetchCommandArgs, mut config: Config) -> Result<()> {
    if let Some(locale) = args.locale {
        config.table.locale = locale;
    }
    let fetch_args = FetchArgs {
        force: args.force,
        table: config.table,
    };
    let path = dispatch::<FetchCommand>(fetch_args)?;
    println!("{}", path.display());
    Ok(())
}
