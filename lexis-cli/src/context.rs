use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use lexis::lexical::codec::META_FILE;
use lexis::{AnalyzerPolicy, Engine, IndexConfig};
use log::info;

use crate::cli::Cli;
use crate::loader;

/// Index configuration from `--config`, or the title/content defaults.
pub fn index_config(cli: &Cli) -> Result<IndexConfig> {
    match &cli.config {
        Some(path) => IndexConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(IndexConfig::builder()
            .field(&cli.title_field, AnalyzerPolicy::Literal)
            .field(&cli.content_field, AnalyzerPolicy::Standard)
            .build()),
    }
}

fn has_saved_index(dir: &Path) -> bool {
    dir.join(META_FILE).is_file()
}

/// Index the documents directory into a fresh engine.
pub fn build_engine(cli: &Cli) -> Result<Engine> {
    let engine = Engine::new(index_config(cli)?).context("Invalid index configuration")?;
    let documents = loader::load_documents(&cli.docs_dir, &cli.title_field, &cli.content_field)?;

    let start = Instant::now();
    let mut writer = engine.writer().context("Invalid index configuration")?;
    for document in documents {
        let title = document
            .get_field(&cli.title_field)
            .unwrap_or_default()
            .to_string();
        let file_start = Instant::now();
        writer
            .add_document(document)
            .with_context(|| format!("Failed to index '{title}'"))?;
        info!("indexed '{title}' in {:?}", file_start.elapsed());
    }
    let snapshot = writer.commit().context("Failed to build index")?;
    info!(
        "indexed {} files in {:?}",
        snapshot.doc_count(),
        start.elapsed()
    );

    engine.publish(snapshot);
    Ok(engine)
}

/// The saved index if `--index-dir` holds one, otherwise a freshly built one.
pub fn open_engine(cli: &Cli) -> Result<Engine> {
    if let Some(dir) = &cli.index_dir
        && has_saved_index(dir)
    {
        info!("opening saved index at {}", dir.display());
        return Engine::open(dir)
            .with_context(|| format!("Failed to open index at {}", dir.display()));
    }
    build_engine(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;

    #[test]
    fn test_build_engine_indexes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Caldo e Affari.txt"), "La riunione di oggi.").unwrap();
        fs::write(dir.path().join("Mattinata.txt"), "Nel pomeriggio.").unwrap();

        let docs_dir = dir.path().to_string_lossy().into_owned();
        let cli = Cli::parse_from(["lexis", "--docs-dir", docs_dir.as_str(), "stats"]);
        let engine = build_engine(&cli).unwrap();

        assert_eq!(engine.generation(), 1);
        assert_eq!(engine.snapshot().doc_count(), 2);
        let hits = engine.query_str("contenuto:pomeriggio", 10, false).unwrap();
        assert_eq!(hits[0].document.get_field("titolo"), Some("Mattinata"));
    }
}
