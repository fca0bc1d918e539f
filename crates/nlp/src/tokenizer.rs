use once_cell::sync::Lazy;
use regex::Regex;

use crate::stop_words::{english_stop_words, StopWords};
use crate::TextAnalyzer;

// Words may carry inner hyphens or dots ("e-mail", "U.S"), a leading apostrophe
// starts a clitic ("'s"), anything else non-blank is a single punctuation token.
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\w+(?:[-.]\w+)*|'\w+|[^\w\s]").expect("token pattern is a valid regex")
});

#[derive(Debug, Clone)]
pub struct Tokenizer {
    token_regex: Regex,
    stop_words: StopWords,
}

impl Tokenizer {
    pub fn english() -> Self {
        Self::with_stop_words(english_stop_words())
    }

    pub fn with_stop_words(stop_words: StopWords) -> Self {
        Tokenizer {
            token_regex: TOKEN_REGEX.clone(),
            stop_words,
        }
    }

    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    pub fn tokenize<'a, 'b>(&'a self, input: &'b str) -> impl Iterator<Item = &'b str> + 'b
    where
        'a: 'b,
    {
        self.token_regex
            .find_iter(input)
            .map(|m| m.as_str())
    }
}

impl TextAnalyzer for Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        Tokenizer::tokenize(self, text).map(str::to_string).collect()
    }

    fn is_stopword(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn tokens(input: &str) -> Vec<String> {
        TextAnalyzer::tokenize(&Tokenizer::english(), input)
    }

    #[test]
    fn test_tokenize_keeps_case_and_punctuation() {
        assert_eq!(tokens("Hello, world!"), vec!["Hello", ",", "world", "!"]);
    }

    #[test]
    fn test_tokenize_possessive_and_compounds() {
        assert_eq!(
            tokens("Trump's e-mail to U.S. officials"),
            vec!["Trump", "'s", "e-mail", "to", "U.S", ".", "officials"]
        );
        assert_eq!(tokens("COVID-19 cases rise"), vec!["COVID-19", "cases", "rise"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokens("").is_empty());
        assert!(tokens("   \t\n").is_empty());
    }

    #[test]
    fn test_tokenize_unicode() {
        assert_eq!(tokens("Café reopens"), vec!["Café", "reopens"]);
    }

    #[test]
    fn test_stop_words() {
        let tokenizer = Tokenizer::english();
        assert!(tokenizer.is_stopword("the"));
        assert!(!tokenizer.is_stopword("The"));
        assert!(!tokenizer.is_stopword("election"));

        let custom = Tokenizer::with_stop_words(HashSet::from(["in".to_string()]));
        assert!(custom.is_stopword("in"));
        assert!(!custom.is_stopword("the"));
    }
}
