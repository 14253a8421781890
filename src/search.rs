//! Query evaluation against an index snapshot.
//!
//! # Module Structure
//!
//! - `query`: term and phrase query types
//! - `parser`: the `field:query text` surface syntax
//! - `phrase`: posting-list intersection and position verification
//! - `similarity`: BM25 scoring
//! - `collector`: bounded top-K ranking
//! - `explanation`: score breakdown trees
//! - `searcher`: ties the above together over one snapshot

pub mod collector;
pub mod explanation;
pub mod parser;
pub mod phrase;
pub mod query;
pub mod searcher;
pub mod similarity;

pub use collector::{ScoredDoc, TopDocs, TopDocsCollector};
pub use explanation::Explanation;
pub use parser::QueryParser;
pub use query::{PhraseQuery, Query, TermQuery};
pub use searcher::{SearchHit, Searcher};
pub use similarity::{Bm25Similarity, Bm25Weight};
