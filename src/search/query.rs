//! Query types.

use std::fmt;
use std::slice;

use crate::lexical::term::Term;

/// Exact lookup of a single term in one field.
#[derive(Debug, Clone, PartialEq)]
pub struct TermQuery {
    term: Term,
    boost: f32,
}

impl TermQuery {
    pub fn new(field: impl Into<String>, text: impl Into<String>) -> Self {
        TermQuery {
            term: Term::new(field, text),
            boost: 1.0,
        }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }

    pub fn term(&self) -> &Term {
        &self.term
    }
}

/// An ordered run of consecutive terms in one field.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseQuery {
    field: String,
    terms: Vec<String>,
    boost: f32,
}

impl PhraseQuery {
    pub fn new<I, S>(field: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PhraseQuery {
            field: field.into(),
            terms: terms.into_iter().map(Into::into).collect(),
            boost: 1.0,
        }
    }

    pub fn with_boost(mut self, boost: f32) -> Self {
        self.boost = boost;
        self
    }
}

/// A query over one field.
///
/// A term query behaves exactly like a one-term phrase; both are evaluated by
/// the same matcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Term(TermQuery),
    Phrase(PhraseQuery),
}

impl Query {
    pub fn term(field: impl Into<String>, text: impl Into<String>) -> Self {
        Query::Term(TermQuery::new(field, text))
    }

    pub fn phrase<I, S>(field: impl Into<String>, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query::Phrase(PhraseQuery::new(field, terms))
    }

    /// Query for whitespace-separated `words`: a term query for one word, a
    /// phrase otherwise.
    pub fn from_words<I, S>(field: impl Into<String>, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut terms: Vec<String> = words.into_iter().map(Into::into).collect();
        if terms.len() == 1 {
            let text = terms.pop().unwrap_or_default();
            Query::term(field, text)
        } else {
            Query::phrase(field, terms)
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Query::Term(q) => &q.term.field,
            Query::Phrase(q) => &q.field,
        }
    }

    /// Terms in query order.
    pub fn terms(&self) -> &[String] {
        match self {
            Query::Term(q) => slice::from_ref(&q.term.text),
            Query::Phrase(q) => &q.terms,
        }
    }

    pub fn boost(&self) -> f32 {
        match self {
            Query::Term(q) => q.boost,
            Query::Phrase(q) => q.boost,
        }
    }
}

impl From<TermQuery> for Query {
    fn from(query: TermQuery) -> Self {
        Query::Term(query)
    }
}

impl From<PhraseQuery> for Query {
    fn from(query: PhraseQuery) -> Self {
        Query::Phrase(query)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::Term(q) => write!(f, "{}", q.term),
            Query::Phrase(q) => write!(f, "{}:\"{}\"", q.field, q.terms.join(" ")),
        }
    }
}
