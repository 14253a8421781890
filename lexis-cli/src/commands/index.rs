use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::context;

/// Index the documents directory and save the result to `--index-dir`.
pub fn run(cli: &Cli) -> Result<()> {
    let dir = cli
        .index_dir
        .as_deref()
        .context("--index-dir is required to save the index")?;

    let engine = context::build_engine(cli)?;
    engine
        .save(dir)
        .with_context(|| format!("Failed to save index to {}", dir.display()))?;

    println!(
        "Indexed {} documents into {}.",
        engine.snapshot().doc_count(),
        dir.display()
    );
    Ok(())
}
