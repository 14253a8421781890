mod common;

use common::{CONTENT, CORPUS, TITLE, snapshot, titles};
use lexis::{DocId, IndexConfig, LexisError, Query, Result};

#[test]
fn test_common_term_matches_every_document() -> Result<()> {
    let snapshot = snapshot();
    let hits = snapshot.query_str("contenuto:riunione", 10, false)?;
    assert_eq!(hits.len(), snapshot.doc_count());
    assert_eq!(hits.len(), CORPUS.len());
    assert!(hits.windows(2).all(|w| w[0].score >= w[1].score));
    Ok(())
}

#[test]
fn test_rare_term_matches_one_document() -> Result<()> {
    let hits = snapshot().query_str("contenuto:pomeriggio", 10, false)?;
    assert_eq!(titles(&hits), vec!["Mattinata Movimentata"]);
    Ok(())
}

#[test]
fn test_phrase_matches_two_documents() -> Result<()> {
    let hits = snapshot().query_str("contenuto:il direttore ha sottolineato", 10, false)?;
    assert_eq!(
        titles(&hits),
        vec!["Dimenticanze e Priorità", "Rinnovo e Riorganizzazione"]
    );
    Ok(())
}

#[test]
fn test_capitalized_phrase_does_not_match_standard_field() -> Result<()> {
    let hits = snapshot().query_str("contenuto:Il direttore ha sottolineato", 10, false)?;
    assert!(hits.is_empty());
    Ok(())
}

#[test]
fn test_absent_term() -> Result<()> {
    assert!(snapshot().query_str("contenuto:divano", 10, false)?.is_empty());
    Ok(())
}

#[test]
fn test_literal_title_term() -> Result<()> {
    let snapshot = snapshot();

    let hits = snapshot.query_str("titolo:e", 10, false)?;
    assert_eq!(
        titles(&hits),
        vec![
            "Caldo e Affari",
            "Dimenticanze e Priorità",
            "Rinnovo e Riorganizzazione"
        ]
    );
    // Same length, same frequency: ties broken by doc id.
    assert_eq!(hits[0].score, hits[1].score);
    assert!(hits[0].doc_id < hits[1].doc_id);

    assert_eq!(titles(&snapshot.query_str("titolo:Caldo", 10, false)?), vec!["Caldo e Affari"]);
    assert!(snapshot.query_str("titolo:caldo", 10, false)?.is_empty());
    assert!(snapshot.query_str("titolo:Computer", 10, false)?.is_empty());
    Ok(())
}

#[test]
fn test_literal_title_phrase_is_case_sensitive() -> Result<()> {
    let snapshot = snapshot();
    let hits = snapshot.query_str("titolo:Dimenticanze e Priorità", 10, false)?;
    assert_eq!(titles(&hits), vec!["Dimenticanze e Priorità"]);

    let hits = snapshot.query_str("titolo:\"dimenticanze e priorità\"", 10, false)?;
    assert!(hits.is_empty());
    Ok(())
}

#[test]
fn test_stored_values_are_verbatim() {
    let snapshot = snapshot();
    for (i, (title, content)) in CORPUS.iter().enumerate() {
        let doc = snapshot.document(DocId::new(i as u32)).unwrap();
        assert_eq!(doc.get_field(TITLE), Some(*title));
        assert_eq!(doc.get_field(CONTENT), Some(*content));
    }
}

#[test]
fn test_query_errors() {
    let snapshot = snapshot();

    let err = snapshot.query_str("contenuto riunione", 10, false).unwrap_err();
    assert!(matches!(err, LexisError::MalformedQuery(_)));

    let err = snapshot.query_str("autore:Rossi", 10, false).unwrap_err();
    assert!(matches!(err, LexisError::UnknownField(_)));
    assert!(err.is_configuration_error());

    assert!(snapshot.query("autore", "Rossi", 10, false).is_err());
}

#[test]
fn test_top_k_limit() -> Result<()> {
    let snapshot = snapshot();
    let all = snapshot.query_str("contenuto:riunione", 10, false)?;
    let top = snapshot.query_str("contenuto:riunione", 2, false)?;
    assert_eq!(top.len(), 2);
    assert_eq!(top[0].doc_id, all[0].doc_id);
    assert_eq!(top[1].doc_id, all[1].doc_id);
    assert!(snapshot.query_str("contenuto:riunione", 0, false)?.is_empty());
    Ok(())
}

#[test]
fn test_identical_inputs_give_identical_results() -> Result<()> {
    let first = snapshot().query_str("contenuto:la riunione", 10, true)?;
    let second = snapshot().query_str("contenuto:la riunione", 10, true)?;
    assert_eq!(first, second);
    assert!(!first.is_empty());
    Ok(())
}

#[test]
fn test_explanations_agree_with_scores() -> Result<()> {
    let snapshot = snapshot();
    let hits = snapshot.query_str("contenuto:il direttore ha sottolineato", 10, true)?;
    for hit in &hits {
        let explanation = hit.explanation.as_ref().unwrap();
        assert_eq!(explanation.value, hit.score);
        let text = explanation.to_string();
        assert!(text.contains("idf, sum of:"));
        assert!(text.contains("freq, occurrences of phrase within document"));
    }

    let query = Query::term(CONTENT, "pomeriggio");
    assert!(snapshot.explain(&query, DocId::new(0))?.is_none());
    Ok(())
}

#[test]
fn test_normalized_queries_ignore_case_on_standard_fields() -> Result<()> {
    let config = IndexConfig {
        normalize_query_terms: true,
        ..common::config()
    };
    let snapshot = common::build(config)?;

    let hits = snapshot.query_str("contenuto:Il Direttore ha SOTTOLINEATO", 10, false)?;
    assert_eq!(
        titles(&hits),
        vec!["Dimenticanze e Priorità", "Rinnovo e Riorganizzazione"]
    );
    assert_eq!(
        titles(&snapshot.query_str("contenuto:POMERIGGIO", 10, false)?),
        vec!["Mattinata Movimentata"]
    );

    // Literal fields stay case-sensitive.
    assert!(snapshot.query_str("titolo:caldo", 10, false)?.is_empty());
    assert_eq!(snapshot.query_str("titolo:Caldo", 10, false)?.len(), 1);
    Ok(())
}

#[test]
fn test_normalized_phrase_keeps_stop_word_gaps() -> Result<()> {
    let config = IndexConfig {
        stop_words: vec!["il".to_string()],
        normalize_query_terms: true,
        ..common::config()
    };
    let snapshot = common::build_from(
        config,
        &[
            ("Nota", "il direttore ha sottolineato"),
            ("Appunto", "direttore il ha parlato"),
        ],
    )?;

    // The dropped "il" still takes its slot between the two words.
    assert_eq!(
        titles(&snapshot.query_str("contenuto:direttore il ha", 10, false)?),
        vec!["Appunto"]
    );
    assert_eq!(
        titles(&snapshot.query_str("contenuto:il direttore ha", 10, false)?),
        vec!["Nota"]
    );
    assert_eq!(
        titles(&snapshot.query_str("contenuto:\"Direttore HA\"", 10, false)?),
        vec!["Nota"]
    );

    // Only stop words: nothing to look up.
    assert!(snapshot.query_str("contenuto:il", 10, false)?.is_empty());
    Ok(())
}

#[test]
fn test_standard_fields_fold_case() -> Result<()> {
    let snapshot = common::build_from(
        common::config(),
        &[
            ("Uno", "Straße"),
            ("Due", "STRASSE"),
            ("Tre", "ΟΔΟΣ"),
            ("Quattro", "οδος"),
        ],
    )?;

    assert_eq!(
        titles(&snapshot.query_str("contenuto:strasse", 10, false)?),
        vec!["Uno", "Due"]
    );
    assert_eq!(
        titles(&snapshot.query_str("contenuto:οδοσ", 10, false)?),
        vec!["Tre", "Quattro"]
    );
    Ok(())
}
