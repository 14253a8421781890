//! Parser for the `field:query text` syntax.
//!
//! The input is split at the first `:`. Both sides are trimmed, one pair of
//! surrounding double quotes is removed from the query text, and the rest is
//! split on whitespace. A single word becomes a [`TermQuery`], several words a
//! [`PhraseQuery`]. Words are taken as-is; any normalization happens at
//! evaluation time.
//!
//! [`TermQuery`]: crate::search::query::TermQuery
//! [`PhraseQuery`]: crate::search::query::PhraseQuery

use ahash::AHashSet;

use crate::error::{LexisError, Result};
use crate::search::query::Query;

/// Parses `field:query text` strings.
///
/// # Examples
///
/// ```
/// use lexis::QueryParser;
///
/// let parser = QueryParser::with_fields(["titolo", "contenuto"]);
/// let query = parser.parse("contenuto: il direttore ha sottolineato").unwrap();
/// assert_eq!(query.field(), "contenuto");
/// assert_eq!(query.terms().len(), 4);
///
/// assert!(parser.parse("nessun separatore").is_err());
/// assert!(parser.parse("autore:Rossi").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryParser {
    known_fields: Option<AHashSet<String>>,
}

impl QueryParser {
    /// A parser that accepts any field name.
    pub fn new() -> Self {
        Self::default()
    }

    /// A parser that rejects fields outside `fields`.
    pub fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QueryParser {
            known_fields: Some(fields.into_iter().map(Into::into).collect()),
        }
    }

    pub fn parse(&self, input: &str) -> Result<Query> {
        let Some((field, text)) = input.split_once(':') else {
            return Err(LexisError::malformed_query(format!(
                "expected '<field>:<query>', got '{input}'"
            )));
        };

        let field = field.trim();
        if field.is_empty() {
            return Err(LexisError::malformed_query(format!(
                "missing field name in '{input}'"
            )));
        }
        if let Some(known) = &self.known_fields
            && !known.contains(field)
        {
            return Err(LexisError::UnknownField(field.to_string()));
        }

        Ok(Query::from_words(field, split_words(text)))
    }
}

/// Trim, drop one pair of surrounding double quotes, split on whitespace.
pub fn split_words(text: &str) -> Vec<&str> {
    let text = text.trim();
    let text = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    text.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::query::Query;

    #[test]
    fn test_parse_term_and_phrase() {
        let parser = QueryParser::new();

        let q = parser.parse("titolo:Caldo").unwrap();
        assert_eq!(q, Query::term("titolo", "Caldo"));

        let q = parser
            .parse("  contenuto :  il direttore   ha sottolineato ")
            .unwrap();
        assert_eq!(
            q,
            Query::phrase("contenuto", ["il", "direttore", "ha", "sottolineato"])
        );
    }

    #[test]
    fn test_splits_at_first_colon_only() {
        let q = QueryParser::new().parse("contenuto:ore 10:30").unwrap();
        assert_eq!(q.terms(), ["ore".to_string(), "10:30".to_string()]);
    }

    #[test]
    fn test_strips_quotes() {
        let q = QueryParser::new()
            .parse("titolo:\"Dimenticanze e Priorità\"")
            .unwrap();
        assert_eq!(q, Query::phrase("titolo", ["Dimenticanze", "e", "Priorità"]));

        // A lone quote is kept.
        let q = QueryParser::new().parse("titolo:\"Caldo").unwrap();
        assert_eq!(q, Query::term("titolo", "\"Caldo"));
    }

    #[test]
    fn test_malformed() {
        let parser = QueryParser::new();
        for input in ["contenuto riunione", "", ":riunione", "   :x"] {
            let err = parser.parse(input).unwrap_err();
            assert!(matches!(err, LexisError::MalformedQuery(_)), "{input}");
        }
    }

    #[test]
    fn test_unknown_field() {
        let parser = QueryParser::with_fields(["titolo", "contenuto"]);
        let err = parser.parse("autore:Rossi").unwrap_err();
        assert!(matches!(err, LexisError::UnknownField(ref f) if f == "autore"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_empty_query_text_is_empty_phrase() {
        let q = QueryParser::new().parse("contenuto:   ").unwrap();
        assert!(q.terms().is_empty());
        let q = QueryParser::new().parse("contenuto:\"\"").unwrap();
        assert!(q.terms().is_empty());
    }
}
