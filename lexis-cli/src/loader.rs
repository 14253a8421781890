//! Reads a directory of text files into documents.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lexis::Document;
use log::{debug, info, warn};

/// One document per `*.txt` file in `dir`, in file-name order.
///
/// The file stem goes into `title_field`, the full content into
/// `content_field`. Other files and subdirectories are skipped. Invalid UTF-8
/// is replaced with U+FFFD.
pub fn load_documents(dir: &Path, title_field: &str, content_field: &str) -> Result<Vec<Document>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read documents directory {}", dir.display()))?;

    let mut paths = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let title = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let bytes = fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        let content = match String::from_utf8(bytes) {
            Ok(content) => content,
            Err(err) => {
                warn!("{} is not valid UTF-8, replacing invalid bytes", path.display());
                String::from_utf8_lossy(err.as_bytes()).into_owned()
            }
        };
        debug!("loaded '{title}' ({} bytes)", content.len());

        documents.push(
            Document::builder()
                .add_field(title_field, title)
                .add_field(content_field, content)
                .build(),
        );
    }

    info!("loaded {} documents from {}", documents.len(), dir.display());
    Ok(documents)
}
