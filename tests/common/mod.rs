#![allow(dead_code)]

use lexis::{AnalyzerPolicy, Document, IndexConfig, IndexSnapshot, Result, SearchHit};

pub const TITLE: &str = "titolo";
pub const CONTENT: &str = "contenuto";

/// Five short meeting notes, in file-name order.
pub const CORPUS: &[(&str, &str)] = &[
    (
        "Caldo e Affari",
        "Oggi la riunione si è svolta in una sala molto calda. Gli affari del trimestre \
         sono andati bene e la riunione è finita presto.",
    ),
    (
        "Dimenticanze e Priorità",
        "Durante la riunione il direttore ha sottolineato le priorità del progetto.",
    ),
    (
        "Mattinata Movimentata",
        "La mattinata è stata movimentata. La riunione è stata rinviata al pomeriggio \
         per un imprevisto.",
    ),
    (
        "Rinnovo e Riorganizzazione",
        "Il direttore ha sottolineato che il rinnovo degli uffici richiede una \
         riorganizzazione. Alla riunione di lunedì ne parleremo ancora con tutto il personale.",
    ),
    (
        "Sala Riunioni Nuova",
        "La nuova sala riunioni è pronta. La prossima riunione si terrà lì.",
    ),
];

pub fn config() -> IndexConfig {
    IndexConfig::builder()
        .field(TITLE, AnalyzerPolicy::Literal)
        .field(CONTENT, AnalyzerPolicy::Standard)
        .build()
}

pub fn documents() -> Vec<Document> {
    documents_from(CORPUS)
}

/// Title/content pairs as documents.
pub fn documents_from(pairs: &[(&str, &str)]) -> Vec<Document> {
    pairs
        .iter()
        .map(|(title, content)| {
            Document::builder()
                .add_field(TITLE, *title)
                .add_field(CONTENT, *content)
                .build()
        })
        .collect()
}

pub fn build(config: IndexConfig) -> Result<IndexSnapshot> {
    build_from(config, CORPUS)
}

pub fn build_from(config: IndexConfig, pairs: &[(&str, &str)]) -> Result<IndexSnapshot> {
    let mut writer = lexis::open_write_session(config)?;
    for doc in documents_from(pairs) {
        writer.add_document(doc)?;
    }
    writer.commit()
}

pub fn snapshot() -> IndexSnapshot {
    build(config()).unwrap()
}

pub fn titles(hits: &[SearchHit]) -> Vec<&str> {
    hits.iter()
        .map(|hit| hit.document.get_field(TITLE).unwrap_or_default())
        .collect()
}
