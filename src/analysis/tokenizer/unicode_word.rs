//! Tokenizer based on Unicode word boundaries (UAX #29).

use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{LexisError, Result};

/// Default maximum token length, in characters.
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 255;

/// Splits text on whitespace and punctuation following the Unicode word
/// boundary rules.
///
/// Letters joined by an apostrophe or a period stay together
/// (`l'importanza`, `e.g`), as do digits separated by `.` or `,`. Words
/// longer than `max_token_length` characters are cut into consecutive chunks,
/// each with its own position.
#[derive(Debug, Clone)]
pub struct UnicodeWordTokenizer {
    max_token_length: usize,
}

impl UnicodeWordTokenizer {
    pub fn new() -> Self {
        UnicodeWordTokenizer {
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
        }
    }

    pub fn with_max_token_length(max_token_length: usize) -> Result<Self> {
        if max_token_length == 0 {
            return Err(LexisError::invalid_argument(
                "max_token_length must be greater than zero",
            ));
        }
        Ok(UnicodeWordTokenizer { max_token_length })
    }

    pub fn max_token_length(&self) -> usize {
        self.max_token_length
    }

    fn push_chunks(&self, word: &str, start: usize, tokens: &mut Vec<Token>) {
        let mut chunk_start = 0;
        let mut chars_in_chunk = 0;
        for (idx, _) in word.char_indices() {
            if chars_in_chunk == self.max_token_length {
                let position = tokens.len() as u32;
                tokens.push(Token::new(
                    &word[chunk_start..idx],
                    position,
                    start + chunk_start,
                    start + idx,
                ));
                chunk_start = idx;
                chars_in_chunk = 0;
            }
            chars_in_chunk += 1;
        }
        if chunk_start < word.len() {
            let position = tokens.len() as u32;
            tokens.push(Token::new(
                &word[chunk_start..],
                position,
                start + chunk_start,
                start + word.len(),
            ));
        }
    }
}

impl Default for UnicodeWordTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let mut tokens = Vec::new();
        for (start, word) in text.unicode_word_indices() {
            self.push_chunks(word, start, &mut tokens);
        }
        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokenizer: &UnicodeWordTokenizer, text: &str) -> Vec<String> {
        tokenizer.tokenize(text).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_splits_on_punctuation_and_whitespace() {
        let tokenizer = UnicodeWordTokenizer::new();
        assert_eq!(
            texts(&tokenizer, "Riunione: il direttore, oggi; (domani)!"),
            vec!["Riunione", "il", "direttore", "oggi", "domani"]
        );
    }

    #[test]
    fn test_keeps_apostrophe_words_together() {
        let tokenizer = UnicodeWordTokenizer::new();
        assert_eq!(
            texts(&tokenizer, "l'importanza dell'ufficio"),
            vec!["l'importanza", "dell'ufficio"]
        );
    }

    #[test]
    fn test_positions_and_offsets() {
        let tokenizer = UnicodeWordTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("Caffè  e   Priorità").unwrap().collect();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], Token::new("Caffè", 0, 0, 6));
        assert_eq!(tokens[1].position, 1);
        assert_eq!(tokens[2].text, "Priorità");
        assert_eq!(tokens[2].position, 2);
        assert_eq!(&"Caffè  e   Priorità"[tokens[2].start_offset..tokens[2].end_offset], "Priorità");
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let tokenizer = UnicodeWordTokenizer::new();
        assert!(texts(&tokenizer, "").is_empty());
        assert!(texts(&tokenizer, " ... !? -- ").is_empty());
    }

    #[test]
    fn test_long_words_are_chunked() {
        let tokenizer = UnicodeWordTokenizer::with_max_token_length(3).unwrap();
        let tokens: Vec<Token> = tokenizer.tokenize("abcdefg hi").unwrap().collect();
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, vec!["abc", "def", "g", "hi"]);
        let positions: Vec<u32> = tokens.iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_zero_max_length_rejected() {
        assert!(UnicodeWordTokenizer::with_max_token_length(0).is_err());
    }
}
