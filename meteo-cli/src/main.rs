//! Binary crate for the `meteo` command-line tool.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - Interactive configuration and city search
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    setup_tracing(cmd.verbose);
    cmd.run().await
}

fn setup_tracing(verbose: bool) {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("meteo_core=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("warn")
    };

    // Reports go to stdout; diagnostics stay on stderr.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
