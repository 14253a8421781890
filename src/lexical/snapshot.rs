//! Immutable, queryable index snapshots.

use std::collections::BTreeMap;
use std::path::Path;

use ahash::AHashMap;

use crate::analysis::analyzer::per_field::PerFieldAnalyzer;
use crate::analysis::policy::AnalyzerPolicy;
use crate::data::{DocId, Document};
use crate::engine::config::IndexConfig;
use crate::error::Result;
use crate::lexical::codec;
use crate::lexical::field_index::FieldIndex;
use crate::lexical::posting::PostingList;
use crate::lexical::term::Term;
use crate::search::collector::{ScoredDoc, TopDocs};
use crate::search::explanation::Explanation;
use crate::search::parser::{QueryParser, split_words};
use crate::search::query::Query;
use crate::search::searcher::{SearchHit, Searcher};
use crate::store::DocumentStore;

/// The frozen result of one write session.
///
/// A snapshot never changes after commit. It is `Send + Sync` and meant to be
/// shared behind an `Arc`; every query method takes `&self`.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    config: IndexConfig,
    analyzer: PerFieldAnalyzer,
    fields: AHashMap<String, FieldIndex>,
    store: DocumentStore,
    generation: u64,
}

impl IndexSnapshot {
    pub(crate) fn new(
        config: IndexConfig,
        analyzer: PerFieldAnalyzer,
        fields: AHashMap<String, FieldIndex>,
        store: DocumentStore,
    ) -> Self {
        IndexSnapshot {
            config,
            analyzer,
            fields,
            store,
            generation: 0,
        }
    }

    pub(crate) fn with_generation(mut self, generation: u64) -> Self {
        self.generation = generation;
        self
    }

    /// Publication counter; 0 unless published through an
    /// [`Engine`](crate::engine::Engine).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub(crate) fn analyzer(&self) -> &PerFieldAnalyzer {
        &self.analyzer
    }

    pub(crate) fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub(crate) fn fields(&self) -> &AHashMap<String, FieldIndex> {
        &self.fields
    }

    pub fn doc_count(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Stored document, exactly as it was added.
    pub fn document(&self, doc_id: DocId) -> Option<&Document> {
        self.store.get(doc_id)
    }

    pub fn documents(&self) -> impl Iterator<Item = (DocId, &Document)> {
        self.store.iter()
    }

    pub fn field(&self, name: &str) -> Option<&FieldIndex> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Known field names: configured ones and any seen in documents.
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// The policy every known field was analyzed with.
    pub fn field_policies(&self) -> BTreeMap<&str, AnalyzerPolicy> {
        self.fields
            .iter()
            .map(|(name, field)| (name.as_str(), field.policy()))
            .collect()
    }

    pub fn postings(&self, term: &Term) -> Option<&PostingList> {
        self.fields.get(&term.field)?.postings(&term.text)
    }

    pub fn searcher(&self) -> Searcher<'_> {
        Searcher::new(self)
    }

    /// A parser that only accepts this snapshot's fields.
    pub fn query_parser(&self) -> QueryParser {
        QueryParser::with_fields(self.fields.keys().cloned())
    }

    pub fn search(&self, query: &Query, limit: usize) -> Result<TopDocs> {
        self.searcher().search(query, limit)
    }

    /// Documents containing `term` in `field`, best first.
    pub fn evaluate_term(&self, field: &str, term: &str, limit: usize) -> Result<Vec<ScoredDoc>> {
        Ok(self.search(&Query::term(field, term), limit)?.hits)
    }

    /// Documents containing `terms` as a consecutive run in `field`, best
    /// first. An empty phrase matches nothing.
    pub fn evaluate_phrase<S: AsRef<str>>(
        &self,
        field: &str,
        terms: &[S],
        limit: usize,
    ) -> Result<Vec<ScoredDoc>> {
        let query = Query::phrase(field, terms.iter().map(|t| t.as_ref()));
        Ok(self.search(&query, limit)?.hits)
    }

    pub fn explain(&self, query: &Query, doc_id: DocId) -> Result<Option<Explanation>> {
        self.searcher().explain(query, doc_id)
    }

    /// Search `field` for the whitespace-separated words of `query_text`.
    pub fn query(
        &self,
        field: &str,
        query_text: &str,
        top_k: usize,
        explain: bool,
    ) -> Result<Vec<SearchHit>> {
        let query = Query::from_words(field, split_words(query_text));
        self.searcher().hits(&query, top_k, explain)
    }

    /// Search with a `field:query text` string.
    pub fn query_str(&self, input: &str, top_k: usize, explain: bool) -> Result<Vec<SearchHit>> {
        let query = self.query_parser().parse(input)?;
        self.searcher().hits(&query, top_k, explain)
    }

    /// Write the snapshot to `dir`, replacing any snapshot stored there.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        codec::save(self, dir.as_ref())
    }

    /// Load a snapshot written by [`IndexSnapshot::save`].
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        codec::load(dir.as_ref())
    }
}
