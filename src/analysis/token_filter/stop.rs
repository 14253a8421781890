//! Stop-word removal.

use std::sync::Arc;

use ahash::AHashSet;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Drops tokens whose text is in the stop set.
///
/// Positions of the remaining tokens are not renumbered, so a phrase cannot
/// match across a removed word.
#[derive(Debug, Clone, Default)]
pub struct StopFilter {
    stop_words: Arc<AHashSet<String>>,
}

impl StopFilter {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StopFilter {
            stop_words: Arc::new(words.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_words = Arc::clone(&self.stop_words);
        Ok(Box::new(
            tokens.filter(move |token| !stop_words.contains(&token.text)),
        ))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    #[test]
    fn test_removes_stop_words_and_keeps_gaps() {
        let tokens = vec![
            Token::new("il", 0, 0, 2),
            Token::new("direttore", 1, 3, 12),
            Token::new("ha", 2, 13, 15),
            Token::new("parlato", 3, 16, 23),
        ];
        let filter = StopFilter::new(["il", "ha"]);
        let kept: Vec<(String, u32)> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| (t.text, t.position))
            .collect();
        assert_eq!(
            kept,
            vec![("direttore".to_string(), 1), ("parlato".to_string(), 3)]
        );
    }

    #[test]
    fn test_empty_set_keeps_everything() {
        let filter = StopFilter::default();
        assert!(filter.is_empty());
        let tokens = vec![Token::new("e", 0, 0, 1)];
        assert_eq!(filter.filter(Box::new(tokens.into_iter())).unwrap().count(), 1);
    }
}
