mod common;

use std::fs;

use lexis::lexical::codec::{DOCUMENTS_FILE, META_FILE, POSTINGS_FILE};
use lexis::{Engine, IndexSnapshot, LexisError, Result};
use tempfile::TempDir;

const QUERIES: &[&str] = &[
    "contenuto:riunione",
    "contenuto:pomeriggio",
    "contenuto:il direttore ha sottolineato",
    "titolo:e",
    "titolo:Dimenticanze e Priorità",
    "contenuto:divano",
];

#[test]
fn test_round_trip_gives_identical_results() -> Result<()> {
    let dir = TempDir::new()?;
    let original = common::snapshot();
    original.save(dir.path())?;

    for file in [POSTINGS_FILE, DOCUMENTS_FILE, META_FILE] {
        assert!(dir.path().join(file).is_file(), "{file}");
    }

    let loaded = IndexSnapshot::open(dir.path())?;
    assert_eq!(loaded.config(), original.config());
    assert_eq!(loaded.field_names(), original.field_names());
    for query in QUERIES {
        assert_eq!(
            loaded.query_str(query, 10, true)?,
            original.query_str(query, 10, true)?,
            "{query}"
        );
    }
    Ok(())
}

#[test]
fn test_saving_twice_replaces() -> Result<()> {
    let dir = TempDir::new()?;
    common::snapshot().save(dir.path())?;

    let mut writer = lexis::open_write_session(common::config())?;
    writer.add_document(lexis::Document::new().with_field(common::CONTENT, "solo questo"))?;
    writer.commit()?.save(dir.path())?;

    let loaded = IndexSnapshot::open(dir.path())?;
    assert_eq!(loaded.doc_count(), 1);
    assert!(loaded.query_str("contenuto:riunione", 10, false)?.is_empty());
    Ok(())
}

#[test]
fn test_corrupt_postings_are_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    common::snapshot().save(dir.path())?;

    let path = dir.path().join(POSTINGS_FILE);
    let mut bytes = fs::read(&path)?;
    let last = bytes.len() - 5;
    bytes[last] = bytes[last].wrapping_add(1);
    fs::write(&path, bytes)?;

    let err = IndexSnapshot::open(dir.path()).unwrap_err();
    assert!(matches!(err, LexisError::Corrupt(_)), "{err}");
    Ok(())
}

#[test]
fn test_truncated_postings_are_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    common::snapshot().save(dir.path())?;

    let path = dir.path().join(POSTINGS_FILE);
    let bytes = fs::read(&path)?;
    fs::write(&path, &bytes[..bytes.len() / 2])?;

    assert!(matches!(
        IndexSnapshot::open(dir.path()),
        Err(LexisError::Corrupt(_))
    ));
    Ok(())
}

#[test]
fn test_edited_documents_are_rejected() -> Result<()> {
    let dir = TempDir::new()?;
    common::snapshot().save(dir.path())?;

    let path = dir.path().join(DOCUMENTS_FILE);
    let text = fs::read_to_string(&path)?.replace("pomeriggio", "mattino");
    fs::write(&path, text)?;

    assert!(matches!(
        IndexSnapshot::open(dir.path()),
        Err(LexisError::Corrupt(_))
    ));
    Ok(())
}

#[test]
fn test_engine_save_and_open() -> Result<()> {
    let dir = TempDir::new()?;
    let engine = Engine::new(common::config())?;
    engine.rebuild(common::documents())?;
    engine.rebuild(common::documents())?;
    engine.save(dir.path())?;

    let reopened = Engine::open(dir.path())?;
    assert_eq!(reopened.generation(), 2);
    assert_eq!(reopened.config(), engine.config());
    assert_eq!(
        reopened.query_str("contenuto:pomeriggio", 10, false)?,
        engine.query_str("contenuto:pomeriggio", 10, false)?
    );

    reopened.rebuild(common::documents())?;
    assert_eq!(reopened.generation(), 3);
    Ok(())
}
