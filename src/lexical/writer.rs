//! Write sessions.
//!
//! An [`IndexWriter`] accumulates documents into per-field posting lists and
//! freezes them into an [`IndexSnapshot`] on [`IndexWriter::commit`]. Every
//! session starts empty; committing closes it.

use std::time::Instant;

use ahash::{AHashMap, AHashSet};
use log::{debug, info, warn};

use crate::analysis::analyzer::per_field::PerFieldAnalyzer;
use crate::data::{DocId, Document};
use crate::engine::config::{IndexConfig, is_valid_field_name};
use crate::error::{LexisError, Result};
use crate::lexical::field_index::{FieldIndex, FieldIndexBuilder};
use crate::lexical::snapshot::IndexSnapshot;
use crate::store::DocumentStore;

/// Statistics about the writing process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterStats {
    /// Number of documents added.
    pub docs_added: u64,
    /// Number of unique `(field, term)` pairs indexed.
    pub unique_terms: u64,
    /// Total `(term, document)` postings created.
    pub total_postings: u64,
    /// Tokens emitted by the analyzers.
    pub tokens_indexed: u64,
}

/// Single-owner write session.
pub struct IndexWriter {
    config: IndexConfig,
    analyzer: PerFieldAnalyzer,
    fields: AHashMap<String, FieldIndexBuilder>,
    store: DocumentStore,
    stats: WriterStats,
    closed: bool,
}

impl std::fmt::Debug for IndexWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexWriter")
            .field("config", &self.config)
            .field("pending_docs", &self.store.len())
            .field("stats", &self.stats)
            .field("closed", &self.closed)
            .finish()
    }
}

impl IndexWriter {
    /// Open a session. The configuration is validated and the per-field
    /// analyzers are resolved once here.
    pub fn new(config: IndexConfig) -> Result<Self> {
        config.validate()?;
        let analyzer = PerFieldAnalyzer::from_config(&config)?;

        let fields = config
            .fields
            .iter()
            .map(|(name, &policy)| (name.clone(), FieldIndexBuilder::new(policy)))
            .collect();

        Ok(IndexWriter {
            config,
            analyzer,
            fields,
            store: DocumentStore::new(),
            stats: WriterStats::default(),
            closed: false,
        })
    }

    /// Add a document and return the id assigned to it.
    ///
    /// The document is either fully indexed or, on error, not at all.
    pub fn add_document(&mut self, doc: Document) -> Result<DocId> {
        self.check_closed()?;
        let doc_id = self.store.next_doc_id()?;

        // Analyze everything before touching the index.
        let mut analyzed = Vec::with_capacity(doc.len());
        for (name, text) in doc.fields() {
            if !is_valid_field_name(name) {
                return Err(LexisError::invalid_argument(format!(
                    "invalid field name '{name}' in document {doc_id}"
                )));
            }
            let tokens: Vec<_> = self.analyzer.analyze_field(name, text)?.collect();
            analyzed.push((name, tokens));
        }

        for (name, tokens) in analyzed {
            if !self.fields.contains_key(name) {
                let policy = self.config.policy_for(name);
                debug!("field '{name}' first seen in document {doc_id}, policy {policy}");
                self.fields
                    .insert(name.to_string(), FieldIndexBuilder::new(policy));
            }
            let Some(field) = self.fields.get_mut(name) else {
                continue;
            };

            let before = field.unique_terms();
            let mut seen: AHashSet<&str> = AHashSet::new();
            for token in &tokens {
                field.add_token(doc_id, token.text.clone(), token.position);
                if seen.insert(token.text.as_str()) {
                    self.stats.total_postings += 1;
                }
            }
            self.stats.unique_terms += (field.unique_terms() - before) as u64;
            self.stats.tokens_indexed += tokens.len() as u64;
            field.set_field_length(doc_id, tokens.len() as u32);
        }

        let assigned = self.store.push(doc)?;
        debug_assert_eq!(assigned, doc_id);
        self.stats.docs_added += 1;
        Ok(doc_id)
    }

    /// Add several documents, returning their ids in order.
    pub fn add_documents<I>(&mut self, docs: I) -> Result<Vec<DocId>>
    where
        I: IntoIterator<Item = Document>,
    {
        let ids = docs
            .into_iter()
            .map(|doc| self.add_document(doc))
            .collect::<Result<Vec<_>>>()?;
        debug!("added a batch of {} documents", ids.len());
        Ok(ids)
    }

    /// Freeze the session into an immutable snapshot and close it.
    pub fn commit(&mut self) -> Result<IndexSnapshot> {
        self.check_closed()?;
        self.closed = true;

        let started = Instant::now();
        let doc_count = self.store.len() as u32;
        let mut reordered = 0;
        let fields: AHashMap<String, FieldIndex> = std::mem::take(&mut self.fields)
            .into_iter()
            .map(|(name, builder)| {
                let (index, fixed) = builder.finish(doc_count);
                reordered += fixed;
                (name, index)
            })
            .collect();
        if reordered > 0 {
            warn!("{reordered} posting lists were out of doc id order and have been re-sorted");
        }

        let snapshot = IndexSnapshot::new(
            self.config.clone(),
            self.analyzer.clone(),
            fields,
            std::mem::take(&mut self.store),
        );
        info!(
            "committed {} documents, {} unique terms, {} postings in {:?}",
            self.stats.docs_added,
            self.stats.unique_terms,
            self.stats.total_postings,
            started.elapsed()
        );
        Ok(snapshot)
    }

    /// Documents added and not yet committed.
    pub fn pending_docs(&self) -> usize {
        self.store.len()
    }

    pub fn stats(&self) -> &WriterStats {
        &self.stats
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn check_closed(&self) -> Result<()> {
        if self.closed {
            Err(LexisError::session_closed("writer has already been committed"))
        } else {
            Ok(())
        }
    }
}
