use anyhow::Result;

use crate::cli::{Cli, SearchCommand};
use crate::context;
use crate::output;

/// Execute a search command.
pub fn run(cli: &Cli, cmd: &SearchCommand) -> Result<()> {
    let engine = context::open_engine(cli)?;
    let hits = engine.query_str(&cmd.query, cmd.limit, !cmd.no_explain)?;
    output::print_search_results(&hits, &cli.title_field, cli.format)
}
