mod agents;
mod cli;
mod error;
mod pubspec;
mod registry;
mod utils;
mod version;
mod workflow;

use clap::Parser;
use cli::{Cli, Commands};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let hosted_url = cli.hosted_url.as_deref();
    let result = match cli.command.unwrap_or(Commands::Analyze { yes: false }) {
        Commands::Analyze { yes } => workflow::execute_analyze(&cli.path, hosted_url, yes),
        Commands::Check => workflow::execute_check(&cli.path, hosted_url),
        Commands::List => workflow::execute_list(&cli.path, hosted_url),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

/// `RUST_LOG` wins over `--verbose`; otherwise only warnings reach stderr.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
