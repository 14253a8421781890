//! Unicode case folding.

use caseless::default_case_fold_str;
use unicode_normalization::UnicodeNormalization;

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Normalizes each token to NFC and applies full Unicode case folding, so
/// `À`, decomposed `A` + grave and `à` all become `à`, and `Straße` and
/// `STRASSE` both become `strasse`.
#[derive(Debug, Clone, Default)]
pub struct LowercaseFilter;

impl LowercaseFilter {
    pub fn new() -> Self {
        LowercaseFilter
    }
}

/// Fold a single term the same way the filter does.
pub fn fold_term(text: &str) -> String {
    default_case_fold_str(&text.nfc().collect::<String>())
        .nfc()
        .collect()
}

impl Filter for LowercaseFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        Ok(Box::new(tokens.map(|mut token| {
            token.text = fold_term(&token.text);
            token
        })))
    }

    fn name(&self) -> &'static str {
        "lowercase"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn run(words: &[&str]) -> Vec<String> {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i as u32, 0, w.len()))
            .collect();
        LowercaseFilter::new()
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_lowercases_non_ascii() {
        assert_eq!(run(&["PRIORITÀ", "Über", "ÉCOLE"]), vec!["priorità", "über", "école"]);
    }

    #[test]
    fn test_composes_before_lowercasing() {
        // "A" followed by a combining grave accent.
        assert_eq!(fold_term("A\u{0300}"), "à");
        assert_eq!(fold_term("\u{00C0}"), "à");
    }

    #[test]
    fn test_multi_char_mapping() {
        // Dotted capital I folds to two code points.
        assert_eq!(fold_term("\u{0130}").chars().count(), 2);
        assert_eq!(fold_term("Straße"), "strasse");
        assert_eq!(fold_term("STRASSE"), "strasse");
    }

    #[test]
    fn test_final_sigma_folds_to_sigma() {
        assert_eq!(fold_term("ΟΔΟΣ"), "οδοσ");
        assert_eq!(fold_term("οδος"), "οδοσ");
        assert_eq!(run(&["ΟΔΟΣ", "Οδος"]), vec!["οδοσ", "οδοσ"]);
    }
}
