//! Query execution over a snapshot.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::data::{DocId, Document};
use crate::error::{LexisError, Result};
use crate::lexical::field_index::FieldIndex;
use crate::lexical::posting::PostingList;
use crate::lexical::snapshot::IndexSnapshot;
use crate::search::collector::{TopDocs, TopDocsCollector};
use crate::search::explanation::Explanation;
use crate::search::phrase;
use crate::search::query::Query;
use crate::search::similarity::Bm25Weight;

/// A ranked result with its stored document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub score: f32,
    pub document: Document,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<Explanation>,
}

/// A query resolved against one field: the posting list and phrase offset of
/// every lookup term, and the scoring weight.
struct PreparedQuery<'a> {
    field: &'a FieldIndex,
    lists: Vec<&'a PostingList>,
    offsets: Vec<u32>,
    weight: Bm25Weight,
}

/// Evaluates queries against a single snapshot.
///
/// Term queries and phrase queries share one path: a term query is a phrase
/// of one term.
#[derive(Debug, Clone, Copy)]
pub struct Searcher<'a> {
    snapshot: &'a IndexSnapshot,
}

impl<'a> Searcher<'a> {
    pub fn new(snapshot: &'a IndexSnapshot) -> Self {
        Searcher { snapshot }
    }

    /// The best `limit` matches, best first.
    ///
    /// Fails with `InvalidArgument` if the query boost is not a positive
    /// finite number.
    pub fn search(&self, query: &Query, limit: usize) -> Result<TopDocs> {
        let mut collector = TopDocsCollector::new(limit);
        if let Some(prepared) = self.prepare(query)? {
            for m in phrase::matching_docs(&prepared.lists, &prepared.offsets) {
                let score = prepared
                    .weight
                    .score(m.freq, prepared.field.field_length(m.doc_id));
                collector.collect(m.doc_id, score);
            }
        }
        let top = collector.into_top_docs();
        debug!("{query}: {} matches", top.total_hits);
        Ok(top)
    }

    /// How `doc_id` scores for `query`, or `None` if it does not match.
    pub fn explain(&self, query: &Query, doc_id: DocId) -> Result<Option<Explanation>> {
        if self.snapshot.document(doc_id).is_none() {
            return Err(LexisError::DocumentNotFound(doc_id));
        }
        let Some(prepared) = self.prepare(query)? else {
            return Ok(None);
        };
        let Some(freq) = phrase::match_doc(&prepared.lists, &prepared.offsets, doc_id) else {
            return Ok(None);
        };
        Ok(Some(prepared.weight.explain(
            format!("weight({query} in {doc_id})"),
            freq,
            prepared.field.field_length(doc_id),
        )))
    }

    /// Run `query` and attach stored documents, and explanations if asked.
    pub fn hits(&self, query: &Query, limit: usize, explain: bool) -> Result<Vec<SearchHit>> {
        let top = self.search(query, limit)?;
        let mut hits = Vec::with_capacity(top.hits.len());
        for scored in top.hits {
            let document = self
                .snapshot
                .document(scored.doc_id)
                .cloned()
                .ok_or(LexisError::DocumentNotFound(scored.doc_id))?;
            let explanation = if explain {
                self.explain(query, scored.doc_id)?
            } else {
                None
            };
            hits.push(SearchHit {
                doc_id: scored.doc_id,
                score: scored.score,
                document,
                explanation,
            });
        }
        Ok(hits)
    }

    fn prepare(&self, query: &Query) -> Result<Option<PreparedQuery<'a>>> {
        let name = query.field();
        let field = self
            .snapshot
            .field(name)
            .ok_or_else(|| LexisError::UnknownField(name.to_string()))?;

        let boost = query.boost();
        if !boost.is_finite() || boost <= 0.0 {
            return Err(LexisError::invalid_argument(format!(
                "boost must be a positive finite number, got {boost}"
            )));
        }

        let (terms, offsets) = self.lookup_terms(query)?;
        if terms.is_empty() {
            return Ok(None);
        }

        let mut lists = Vec::with_capacity(terms.len());
        for term in &terms {
            match field.postings(term) {
                Some(list) => lists.push(list),
                None => return Ok(None),
            }
        }

        let stats = field.stats();
        let weight = self.snapshot.config().similarity.weight(
            terms
                .into_iter()
                .zip(&lists)
                .map(|(term, list)| (term, list.doc_frequency()))
                .collect(),
            stats.doc_count,
            stats.sum_total_term_freq,
            query.boost(),
        );

        Ok(Some(PreparedQuery {
            field,
            lists,
            offsets,
            weight,
        }))
    }

    /// Terms to look up with their offsets from the first term: the query
    /// words as given, or their analyzed form when query normalization is
    /// enabled.
    ///
    /// Normalized words are analyzed as one text, so a word the analyzer
    /// drops still takes up its slot in the phrase.
    fn lookup_terms(&self, query: &Query) -> Result<(Vec<String>, Vec<u32>)> {
        if !self.snapshot.config().normalize_query_terms {
            let terms = query.terms().to_vec();
            let offsets = (0..terms.len() as u32).collect();
            return Ok((terms, offsets));
        }

        let text = query.terms().join(" ");
        let mut terms = Vec::new();
        let mut offsets = Vec::new();
        let mut first = None;
        for token in self.snapshot.analyzer().analyze_field(query.field(), &text)? {
            let base = *first.get_or_insert(token.position);
            offsets.push(token.position - base);
            terms.push(token.text);
        }
        Ok((terms, offsets))
    }
}
