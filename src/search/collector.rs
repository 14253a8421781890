//! Top-K collection.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::data::DocId;

/// A matching document and its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredDoc {
    pub doc_id: DocId,
    pub score: f32,
}

impl ScoredDoc {
    pub fn new(doc_id: DocId, score: f32) -> Self {
        ScoredDoc { doc_id, score }
    }

    /// Rank order: higher score first, then lower doc id.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// Heap entry ordered so that the better-ranked document compares greater.
#[derive(Debug, Clone, Copy)]
struct Ranked(ScoredDoc);

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.rank_cmp(&other.0).reverse()
    }
}

/// Collects the `limit` best documents with a bounded min-heap.
#[derive(Debug)]
pub struct TopDocsCollector {
    limit: usize,
    heap: BinaryHeap<Reverse<Ranked>>,
    total_hits: usize,
}

impl TopDocsCollector {
    pub fn new(limit: usize) -> Self {
        TopDocsCollector {
            limit,
            heap: BinaryHeap::with_capacity(limit.min(1024) + 1),
            total_hits: 0,
        }
    }

    pub fn collect(&mut self, doc_id: DocId, score: f32) {
        self.total_hits += 1;
        if self.limit == 0 {
            return;
        }

        let candidate = Ranked(ScoredDoc::new(doc_id, score));
        if self.heap.len() < self.limit {
            self.heap.push(Reverse(candidate));
        } else if let Some(Reverse(worst)) = self.heap.peek()
            && candidate > *worst
        {
            self.heap.pop();
            self.heap.push(Reverse(candidate));
        }
    }

    pub fn into_top_docs(self) -> TopDocs {
        // Ascending order of Reverse<Ranked> is best-first.
        let hits = self
            .heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(Ranked(doc))| doc)
            .collect();
        TopDocs {
            total_hits: self.total_hits,
            hits,
        }
    }
}

/// Ranked results of one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopDocs {
    /// Number of matching documents, including those beyond the limit.
    pub total_hits: usize,
    /// Best documents, best first.
    pub hits: Vec<ScoredDoc>,
}

impl TopDocs {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}
