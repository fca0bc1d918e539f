pub mod stop_words;
pub mod tokenizer;

use std::path::Path;

pub use stop_words::{StopWords, StopWordsError};
pub use tokenizer::Tokenizer;

/// Text capability used by the word counter.
///
/// Implementations are built once and then shared read-only between every
/// counting task, hence the `Send + Sync` bound.
pub trait TextAnalyzer: Send + Sync {
    /// Splits `text` into raw tokens. Tokens keep their original case.
    fn tokenize(&self, text: &str) -> Vec<String>;

    /// `word` is expected to be lower-case already.
    fn is_stopword(&self, word: &str) -> bool;
}

/// `true` when `word` is non-empty and made only of alphabetic characters.
pub fn is_alphabetic_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(char::is_alphabetic)
}

/// Builds the tokenizer: the stop words in `stop_words_path` if given, the
/// English list otherwise.
pub fn build_tokenizer(stop_words_path: Option<&Path>) -> Result<Tokenizer, StopWordsError> {
    match stop_words_path {
        Some(path) => Ok(Tokenizer::with_stop_words(stop_words::load_stop_words(
            path,
        )?)),
        None => Ok(Tokenizer::english()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_alphabetic_word() {
        assert!(is_alphabetic_word("news"));
        assert!(is_alphabetic_word("café"));
        assert!(!is_alphabetic_word(""));
        assert!(!is_alphabetic_word("covid-19"));
        assert!(!is_alphabetic_word("'s"));
        assert!(!is_alphabetic_word("u.s"));
        assert!(!is_alphabetic_word("2024"));
    }

    #[test]
    fn test_build_tokenizer_default() {
        let tokenizer = build_tokenizer(None).unwrap();
        assert!(tokenizer.is_stopword("the"));
    }
}
