//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "container-tabs")]
#[command(author, version, about = "Reconcile sidebar containers against host notifications", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: SubCommand,

    /// Output format as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (debug logging unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum SubCommand {
    /// Replay a fixture and print the resulting sidebar
    Replay {
        /// Path to the fixture JSON file
        fixture: PathBuf,

        /// Path to a sidebar config JSON file
        #[arg(long, env = "CONTAINER_TABS_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Replay a fixture and verify every container is rendered exactly once
    Check {
        /// Path to the fixture JSON file
        fixture: PathBuf,

        /// Path to a sidebar config JSON file
        #[arg(long, env = "CONTAINER_TABS_CONFIG")]
        config: Option<PathBuf>,
    },
}
