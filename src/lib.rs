//! # Lexis
//!
//! A small full-text search core.
//!
//! ## Features
//!
//! - Per-field analysis: Unicode-aware standard analyzer and a literal
//!   whitespace analyzer
//! - Positional inverted index with per-field statistics
//! - Term and exact phrase queries with BM25 scoring and explanations
//! - Immutable snapshots shared across reader threads
//! - Optional save/load of snapshots
//!
//! ## Example
//!
//! ```
//! use lexis::{AnalyzerPolicy, Document, IndexConfig, open_write_session};
//!
//! let config = IndexConfig::builder()
//!     .field("titolo", AnalyzerPolicy::Literal)
//!     .field("contenuto", AnalyzerPolicy::Standard)
//!     .build();
//!
//! let mut writer = open_write_session(config).unwrap();
//! writer
//!     .add_document(
//!         Document::builder()
//!             .add_field("titolo", "Dimenticanze e Priorità")
//!             .add_field("contenuto", "Il direttore ha sottolineato le priorità.")
//!             .build(),
//!     )
//!     .unwrap();
//! let snapshot = writer.commit().unwrap();
//!
//! let hits = snapshot
//!     .query_str("contenuto:il direttore ha sottolineato", 10, false)
//!     .unwrap();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].document.get_field("titolo"), Some("Dimenticanze e Priorità"));
//! ```

pub mod analysis;
mod data;
pub mod engine;
mod error;
pub mod lexical;
pub mod search;
pub mod storage;
pub mod store;

pub use analysis::analyzer::analyzer::Analyzer;
pub use analysis::policy::AnalyzerPolicy;
pub use data::{DocId, Document, DocumentBuilder};
pub use engine::Engine;
pub use engine::config::{IndexConfig, IndexConfigBuilder};
pub use error::{LexisError, Result};
pub use lexical::{IndexSnapshot, IndexWriter, Term, WriterStats};
pub use search::{
    Bm25Similarity, Explanation, PhraseQuery, Query, QueryParser, ScoredDoc, SearchHit, TermQuery,
    TopDocs,
};

/// Open a write session. Same as [`IndexWriter::new`].
pub fn open_write_session(config: IndexConfig) -> Result<IndexWriter> {
    IndexWriter::new(config)
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
