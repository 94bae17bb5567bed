//! parking-ledger - Parking allocation and billing engine
//!
//! This is the main entry point for the parking-ledger CLI application.
//! It handles command-line argument parsing, loads the configuration and
//! dispatches to the appropriate command handlers.

use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;
use parking_ledger::cli::handlers::{
    HandlerContext, QuoteParams, handle_config_path, handle_config_show, handle_layout,
    handle_quote,
};
use parking_ledger::cli::{Cli, Commands, ConfigCommands, OutputFormatter};
use parking_ledger::config::Config;
use parking_ledger::error::{ParkingError, Result};
use parking_ledger::interactive::{ParkingShell, run_batch};
use tracing_subscriber::EnvFilter;

/// Main entry point for the parking-ledger CLI
///
/// Parses command-line arguments and executes the requested command.
/// Handles errors gracefully and provides helpful error messages to users.
fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Configure output formatter based on flags
    let formatter = OutputFormatter::new(cli.json, cli.no_color);

    // Execute the command and handle errors
    if let Err(e) = run(cli, &formatter) {
        handle_error(&e, &formatter);
        process::exit(1);
    }
}

/// Run the CLI application with the parsed arguments
///
/// # Errors
///
/// Returns any error that occurs while loading configuration or running
/// the command
fn run(cli: Cli, formatter: &OutputFormatter) -> Result<()> {
    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    dispatch_command(cli.command.unwrap_or(Commands::Shell), &config, formatter)
}

/// Install the tracing subscriber
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` is honored when set.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        Some(EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().ok()
    };

    if let Some(filter) = filter {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
}

fn dispatch_command(
    command: Commands,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    match command {
        Commands::Shell => {
            let context = HandlerContext::new(config, *formatter)?;
            ParkingShell::new(context).run()
        },
        Commands::Batch { file } => {
            let mut context = HandlerContext::new(config, *formatter)?;
            let summary = match file {
                Some(path) => run_batch(&mut context, BufReader::new(File::open(path)?))?,
                None => run_batch(&mut context, io::stdin().lock())?,
            };
            if summary.failed > 0 {
                formatter.warning(&format!(
                    "{} of {} commands failed",
                    summary.failed,
                    summary.executed + summary.failed
                ));
            }
            Ok(())
        },
        Commands::Quote {
            kind,
            charging,
            hours,
            vip,
        } => handle_quote(
            config,
            &QuoteParams {
                kind,
                charging,
                hours,
                vip,
            },
            formatter,
        )
        .map(|_| ()),
        Commands::Layout => handle_layout(config, formatter),
        Commands::Config { command } => match command {
            ConfigCommands::Show => handle_config_show(config, formatter),
            ConfigCommands::Path => handle_config_path(formatter),
        },
    }
}

/// Handle errors with enhanced user feedback
///
/// Displays the error message along with helpful suggestions for recovery.
fn handle_error(error: &ParkingError, formatter: &OutputFormatter) {
    // Display the main error message
    formatter.error(&error.user_message());

    // Display suggestions if available
    let suggestions = error.suggestions();
    if !suggestions.is_empty() {
        formatter.info("\nSuggestions:");
        for suggestion in &suggestions {
            formatter.info(&format!("  • {suggestion}"));
        }
    }

    // In JSON mode, output error as JSON
    if formatter.is_json() {
        let _ = formatter.print_json(&serde_json::json!({
            "status": "error",
            "error": error.to_string(),
            "error_type": format!("{:?}", error),
            "suggestions": suggestions,
            "recoverable": error.is_recoverable(),
            "is_config_error": error.is_config_error(),
        }));
    }

    // In verbose mode, show the full error chain
    if tracing::enabled!(tracing::Level::DEBUG) {
        eprintln!("\nDebug information:");
        eprintln!("{error:?}");
    }
}
