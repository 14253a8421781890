use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

/// Lexis - full-text search over a directory of text files
#[derive(Parser)]
#[command(name = "lexis", version, about)]
pub struct Cli {
    /// Directory of `*.txt` files to index.
    #[arg(long, env = "LEXIS_DOCS_DIR", default_value = "./docs")]
    pub docs_dir: PathBuf,

    /// Directory holding a saved index. Searches use it when present.
    #[arg(long, env = "LEXIS_INDEX_DIR")]
    pub index_dir: Option<PathBuf>,

    /// Index configuration as a JSON file.
    #[arg(long, env = "LEXIS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Field receiving the file name, without extension.
    #[arg(long, default_value = "titolo")]
    pub title_field: String,

    /// Field receiving the file content.
    #[arg(long, default_value = "contenuto")]
    pub content_field: String,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Index the documents directory and save the index.
    Index,
    /// Run one `field:query` search.
    Search(SearchCommand),
    /// Show per-field index statistics.
    Stats,
    /// Start an interactive query loop.
    Repl(ReplCommand),
}

#[derive(Parser)]
pub struct SearchCommand {
    /// Query in the form `field:query text`.
    pub query: String,

    /// Maximum number of results.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Omit score explanations.
    #[arg(long)]
    pub no_explain: bool,
}

#[derive(Parser)]
pub struct ReplCommand {
    /// Maximum number of results per query.
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Omit score explanations.
    #[arg(long)]
    pub no_explain: bool,
}
