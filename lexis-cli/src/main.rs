mod cli;
mod commands;
mod context;
mod loader;
mod output;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::commands::{index, repl, search, stats};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Index => index::run(&cli),
        Command::Search(cmd) => search::run(&cli, cmd),
        Command::Stats => stats::run(&cli),
        Command::Repl(cmd) => repl::run(&cli, cmd),
    }
}
