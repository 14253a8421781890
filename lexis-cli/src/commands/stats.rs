use anyhow::Result;

use crate::cli::Cli;
use crate::context;
use crate::output;

pub fn run(cli: &Cli) -> Result<()> {
    let engine = context::open_engine(cli)?;
    output::print_stats(&engine.snapshot(), cli.format)
}
