//! # Glazier fail
//!
//! Raises a Glazier fatal error from the command line, for build scripts
//! that need the standard failure message, log collection and exit status.

use clap::{Args, Parser, Subcommand};
use glazier_error::config::ReportingPreferences;
use glazier_error::registry::template;
use glazier_error::{codes, fatal, ErrorCode, ErrorRegistry, FatalError};
use std::path::PathBuf;
use std::process::ExitCode;

/// Report a terminal Glazier failure
#[derive(Debug, Parser)]
#[command(name = "glazier-fail")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose output (can be repeated: -v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Reporting configuration file (TOML).
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also forward log events to the standard logger.
    #[arg(long, global = true)]
    log_facade: bool,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Report an error code and exit with status 1.
    Raise(RaiseArgs),

    /// List the registered error codes.
    List,

    /// Panic with a message, exercising the uncaught-failure hook.
    Panic {
        /// Panic message.
        message: String,
    },
}

#[derive(Debug, Args)]
struct RaiseArgs {
    /// Numeric error code.
    code: u32,

    /// Message to use instead of the registered one.
    #[arg(short, long)]
    message: Option<String>,

    /// Underlying failure to include in the report.
    #[arg(short, long)]
    exception: Option<String>,

    /// Skip diagnostic log collection.
    #[arg(long)]
    no_collect: bool,

    /// Template argument as NAME=VALUE; values fill placeholders in order.
    #[arg(short = 'a', long = "arg", value_name = "NAME=VALUE", value_parser = parse_key_val)]
    args: Vec<(String, String)>,
}

fn parse_key_val(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, found '{}'", raw))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let mut preferences = match &cli.config {
        Some(path) => match ReportingPreferences::from_toml_file(path) {
            Ok(preferences) => preferences,
            Err(e) => FatalError::default().exception(e).collect_logs(false).raise(),
        },
        None => ReportingPreferences::default(),
    };
    if cli.log_facade {
        preferences.forward_to_log_facade = true;
    }
    log::debug!("Reporting preferences: {:?}", preferences);

    if let Err(e) = glazier_error::init_global_reporting(&preferences) {
        FatalError::default().exception(e).collect_logs(false).raise()
    }

    match cli.command {
        Command::Raise(args) => raise(args),
        Command::List => {
            list();
            ExitCode::SUCCESS
        }
        Command::Panic { message } => {
            glazier_error::install_panic_hook();
            panic!("{}", message)
        }
    }
}

fn raise(args: RaiseArgs) -> ! {
    let mut error = FatalError::new(ErrorCode::new(args.code)).collect_logs(!args.no_collect);

    if let Some(message) = args.message {
        error = error.message(message);
    }
    if let Some(exception) = args.exception {
        error = error.exception(exception);
    }
    for (name, value) in args.args {
        error = error.arg(name, value);
    }

    log::info!("Raising error {}", error.code());
    error.raise()
}

fn list() {
    let registry = ErrorRegistry::global();
    for code in registry.codes() {
        if let Some(metadata) = registry.get(code) {
            match template::required_values(metadata.template) {
                Ok(0) => println!("{:>5}  {:<9} {}", code, metadata.category, metadata.template),
                Ok(count) => println!(
                    "{:>5}  {:<9} {} ({} args)",
                    code, metadata.category, metadata.template, count
                ),
                Err(e) => println!(
                    "{:>5}  {:<9} {} (malformed: {})",
                    code, metadata.category, metadata.template, e
                ),
            }
        }
    }
    println!();
    println!("Reserved: {}", reserved_codes());
    println!("Help: {}", fatal::reporter().help_uri());
}

fn reserved_codes() -> String {
    codes::RESERVED
        .iter()
        .map(|code| code.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
