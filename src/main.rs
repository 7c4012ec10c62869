//! container-tabs CLI - replay host notifications against the sidebar engine

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use container_tabs::cli::{Args, SubCommand};
use container_tabs::{
    format_output, format_report, replay, Config, Fixture, OutputFormat, ReplayReport,
};

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Returns whether the sidebar ended up consistent
fn run(args: Args) -> anyhow::Result<bool> {
    let output_format = if args.json { OutputFormat::Json } else { OutputFormat::Human };
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    match args.command {
        SubCommand::Replay { fixture, config } => {
            let config = load_config(config.as_deref())?;
            let script = Fixture::load(&fixture)
                .with_context(|| format!("failed to load fixture {}", fixture.display()))?;
            let outcome = runtime.block_on(replay(&script, config))?;

            println!("{}", format_output(&outcome.reconciler.snapshot(), &output_format));
            if args.verbose {
                eprintln!(
                    "--- {} notifications handled, {} failed ---",
                    outcome.processed, outcome.failed
                );
            }
            Ok(true)
        }

        SubCommand::Check { fixture, config } => {
            let config = load_config(config.as_deref())?;
            let script = Fixture::load(&fixture)
                .with_context(|| format!("failed to load fixture {}", fixture.display()))?;
            let outcome = runtime.block_on(replay(&script, config))?;

            let report = ReplayReport::from(&outcome);
            println!("{}", format_report(&report, &output_format));
            Ok(report.is_consistent())
        }
    }
}
