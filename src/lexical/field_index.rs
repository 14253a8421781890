//! Per-field term dictionaries and statistics.

use ahash::AHashMap;

use crate::analysis::policy::AnalyzerPolicy;
use crate::data::DocId;
use crate::lexical::posting::PostingList;

/// Aggregate statistics of one field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldStats {
    /// Documents with at least one token in the field.
    pub doc_count: u32,
    /// Tokens in the field across all documents.
    pub sum_total_term_freq: u64,
    /// Distinct terms.
    pub unique_terms: u64,
}

/// The frozen inverted index of one field.
#[derive(Debug, Clone)]
pub struct FieldIndex {
    policy: AnalyzerPolicy,
    terms: AHashMap<String, PostingList>,
    /// Token count per document, indexed by doc id.
    field_lengths: Vec<u32>,
    stats: FieldStats,
}

impl FieldIndex {
    pub(crate) fn from_parts(
        policy: AnalyzerPolicy,
        terms: AHashMap<String, PostingList>,
        field_lengths: Vec<u32>,
    ) -> Self {
        let stats = FieldStats {
            doc_count: field_lengths.iter().filter(|&&len| len > 0).count() as u32,
            sum_total_term_freq: field_lengths.iter().map(|&len| len as u64).sum(),
            unique_terms: terms.len() as u64,
        };
        FieldIndex {
            policy,
            terms,
            field_lengths,
            stats,
        }
    }

    pub fn empty(policy: AnalyzerPolicy) -> Self {
        Self::from_parts(policy, AHashMap::new(), Vec::new())
    }

    pub fn policy(&self) -> AnalyzerPolicy {
        self.policy
    }

    pub fn stats(&self) -> FieldStats {
        self.stats
    }

    pub fn postings(&self, term: &str) -> Option<&PostingList> {
        self.terms.get(term)
    }

    pub fn doc_freq(&self, term: &str) -> u32 {
        self.terms.get(term).map_or(0, PostingList::doc_frequency)
    }

    /// Number of tokens the field holds in `doc_id`, 0 if absent.
    pub fn field_length(&self, doc_id: DocId) -> u32 {
        self.field_lengths
            .get(doc_id.as_usize())
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn field_lengths(&self) -> &[u32] {
        &self.field_lengths
    }

    pub fn terms(&self) -> impl Iterator<Item = (&str, &PostingList)> {
        self.terms.iter().map(|(t, p)| (t.as_str(), p))
    }

    /// Terms in lexicographic order.
    pub fn sorted_terms(&self) -> Vec<(&str, &PostingList)> {
        let mut terms: Vec<_> = self.terms().collect();
        terms.sort_unstable_by(|a, b| a.0.cmp(b.0));
        terms
    }
}

/// Accumulates postings for one field during a write session.
#[derive(Debug)]
pub(crate) struct FieldIndexBuilder {
    policy: AnalyzerPolicy,
    terms: AHashMap<String, PostingList>,
    field_lengths: Vec<u32>,
}

impl FieldIndexBuilder {
    pub(crate) fn new(policy: AnalyzerPolicy) -> Self {
        FieldIndexBuilder {
            policy,
            terms: AHashMap::new(),
            field_lengths: Vec::new(),
        }
    }

    /// Returns `true` when the term was seen for the first time.
    pub(crate) fn add_token(&mut self, doc_id: DocId, term: String, position: u32) -> bool {
        let mut created = false;
        self.terms
            .entry(term)
            .or_insert_with(|| {
                created = true;
                PostingList::new()
            })
            .push_position(doc_id, position);
        created
    }

    pub(crate) fn set_field_length(&mut self, doc_id: DocId, length: u32) {
        let index = doc_id.as_usize();
        if self.field_lengths.len() <= index {
            self.field_lengths.resize(index + 1, 0);
        }
        self.field_lengths[index] = length;
    }

    pub(crate) fn unique_terms(&self) -> usize {
        self.terms.len()
    }

    /// Freeze the field, restoring doc id order where needed.
    ///
    /// Returns the index and the number of posting lists that were reordered.
    pub(crate) fn finish(mut self, doc_count: u32) -> (FieldIndex, usize) {
        let mut reordered = 0;
        for list in self.terms.values_mut() {
            if list.ensure_sorted() {
                reordered += 1;
            }
        }
        self.field_lengths.resize(doc_count as usize, 0);
        (
            FieldIndex::from_parts(self.policy, self.terms, self.field_lengths),
            reordered,
        )
    }
}
