//! Command-line interface for parking-ledger
//!
//! Argument definitions live here; the work is done by [`handlers`] and the
//! interactive session in [`crate::interactive`].

pub mod handlers;
pub mod output;

pub use output::OutputFormatter;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Parking allocation and billing engine
#[derive(Parser, Debug)]
#[command(name = "parking-ledger", version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive menu (default)
    Shell,

    /// Run session commands read line by line from a file or stdin
    Batch {
        /// Command file; stdin when omitted
        file: Option<PathBuf>,
    },

    /// Quote the fee for a stay without parking anything
    Quote {
        /// Vehicle kind (motorcycle, car, ev)
        #[arg(short, long)]
        kind: String,

        /// EV needs charging
        #[arg(long)]
        charging: bool,

        /// Length of stay in whole hours
        #[arg(long)]
        hours: u32,

        /// Quote for a VIP slot
        #[arg(long)]
        vip: bool,
    },

    /// Show the configured slot layout
    Layout,

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print the default configuration file path
    Path,
}
