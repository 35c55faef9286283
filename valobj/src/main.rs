mod commands;
mod ops;
mod reports;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("VALOBJ_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    Cli::parse().run()
}
