//! Freetext Finder - command-line entry point.

use clap::Parser;
use freetext_finder::cli;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr so `--json` output stays machine-readable
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("freetext_finder=info".parse()?))
        .init();

    cli::run_command(&args)
}
