//! BM25 scoring.
//!
//! A [`Bm25Similarity`] holds the tuning parameters. For each query it
//! produces a [`Bm25Weight`] that fixes the collection-level statistics (idf,
//! average field length), so per-document scoring only needs the match
//! frequency and the document's field length. Explanations are derived from
//! the same [`ScoreBreakdown`] the scorer computes.

use serde::{Deserialize, Serialize};

use crate::error::{LexisError, Result};
use crate::search::explanation::Explanation;

/// Okapi BM25 parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bm25Similarity {
    /// Term frequency saturation.
    pub k1: f32,
    /// Length normalization, between 0 (none) and 1 (full).
    pub b: f32,
}

impl Default for Bm25Similarity {
    fn default() -> Self {
        Bm25Similarity { k1: 1.2, b: 0.75 }
    }
}

impl Bm25Similarity {
    pub fn new(k1: f32, b: f32) -> Result<Self> {
        let similarity = Bm25Similarity { k1, b };
        similarity.validate()?;
        Ok(similarity)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.k1.is_finite() || self.k1 < 0.0 {
            return Err(LexisError::invalid_config(format!(
                "k1 must be a finite non-negative number, got {}",
                self.k1
            )));
        }
        if !(0.0..=1.0).contains(&self.b) {
            return Err(LexisError::invalid_config(format!(
                "b must be within [0, 1], got {}",
                self.b
            )));
        }
        Ok(())
    }

    /// `ln(1 + (N - n + 0.5) / (n + 0.5))`
    pub fn idf(&self, doc_freq: u32, doc_count: u32) -> f32 {
        let n = doc_freq as f64;
        let total = doc_count as f64;
        (1.0 + (total - n + 0.5) / (n + 0.5)).ln() as f32
    }

    /// Build the per-query weight.
    ///
    /// `terms` holds `(term, doc_freq)` for every term of the query, in query
    /// order. A phrase's idf is the sum of its terms' idfs.
    pub fn weight(
        &self,
        terms: Vec<(String, u32)>,
        doc_count: u32,
        sum_total_term_freq: u64,
        boost: f32,
    ) -> Bm25Weight {
        let avg_field_length = if doc_count == 0 {
            1.0
        } else {
            (sum_total_term_freq as f64 / doc_count as f64) as f32
        };
        let terms: Vec<TermIdf> = terms
            .into_iter()
            .map(|(text, doc_freq)| TermIdf {
                idf: self.idf(doc_freq, doc_count),
                text,
                doc_freq,
            })
            .collect();
        let idf = terms.iter().map(|t| t.idf).sum();

        Bm25Weight {
            similarity: *self,
            terms,
            idf,
            doc_count,
            avg_field_length,
            boost,
        }
    }
}

/// Inverse document frequency of one query term.
#[derive(Debug, Clone, PartialEq)]
pub struct TermIdf {
    pub text: String,
    pub doc_freq: u32,
    pub idf: f32,
}

/// Query-level scoring state.
#[derive(Debug, Clone)]
pub struct Bm25Weight {
    similarity: Bm25Similarity,
    terms: Vec<TermIdf>,
    idf: f32,
    doc_count: u32,
    avg_field_length: f32,
    boost: f32,
}

/// Every input and intermediate value of one document's score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub boost: f32,
    pub idf: f32,
    pub freq: f32,
    pub field_length: u32,
    pub avg_field_length: f32,
    pub k1: f32,
    pub b: f32,
    pub tf: f32,
    pub score: f32,
}

impl Bm25Weight {
    pub fn idf(&self) -> f32 {
        self.idf
    }

    pub fn avg_field_length(&self) -> f32 {
        self.avg_field_length
    }

    pub fn breakdown(&self, freq: u32, field_length: u32) -> ScoreBreakdown {
        let Bm25Similarity { k1, b } = self.similarity;
        let freq = freq as f32;
        let dl = field_length as f32;
        let norm = k1 * (1.0 - b + b * dl / self.avg_field_length);
        let tf = freq / (freq + norm);

        ScoreBreakdown {
            boost: self.boost,
            idf: self.idf,
            freq,
            field_length,
            avg_field_length: self.avg_field_length,
            k1,
            b,
            tf,
            score: self.boost * self.idf * tf,
        }
    }

    pub fn score(&self, freq: u32, field_length: u32) -> f32 {
        self.breakdown(freq, field_length).score
    }

    /// Explanation tree for one matching document.
    pub fn explain(&self, description: String, freq: u32, field_length: u32) -> Explanation {
        let parts = self.breakdown(freq, field_length);

        let idf = if self.terms.len() == 1 {
            self.term_idf_explanation(&self.terms[0])
        } else {
            Explanation::with_details(
                parts.idf,
                "idf, sum of:",
                self.terms
                    .iter()
                    .map(|term| self.term_idf_explanation(term))
                    .collect(),
            )
        };

        let tf = Explanation::with_details(
            parts.tf,
            "tf, computed as freq / (freq + k1 * (1 - b + b * dl / avgdl)) from:",
            vec![
                Explanation::new(parts.freq, "freq, occurrences of phrase within document"),
                Explanation::new(parts.k1, "k1, term saturation parameter"),
                Explanation::new(parts.b, "b, length normalization parameter"),
                Explanation::new(parts.field_length as f32, "dl, length of field"),
                Explanation::new(parts.avg_field_length, "avgdl, average length of field"),
            ],
        );

        let mut details = Vec::with_capacity(3);
        if parts.boost != 1.0 {
            details.push(Explanation::new(parts.boost, "boost"));
        }
        details.push(idf);
        details.push(tf);

        Explanation::with_details(
            parts.score,
            format!("{description} [BM25], result of:"),
            vec![Explanation::with_details(
                parts.score,
                format!(
                    "score(freq={}), computed as boost * idf * tf from:",
                    parts.freq
                ),
                details,
            )],
        )
    }

    fn term_idf_explanation(&self, term: &TermIdf) -> Explanation {
        Explanation::with_details(
            term.idf,
            format!(
                "idf({}), computed as log(1 + (N - n + 0.5) / (n + 0.5)) from:",
                term.text
            ),
            vec![
                Explanation::new(term.doc_freq as f32, "n, number of documents containing term"),
                Explanation::new(self.doc_count as f32, "N, total number of documents with field"),
            ],
        )
    }
}
