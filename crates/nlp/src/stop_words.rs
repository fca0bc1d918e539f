use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

pub type StopWords = HashSet<String>;

#[derive(Debug, Error)]
pub enum StopWordsError {
    #[error("Cannot read stop words file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Stop words file {0:?} doesn't contain any word")]
    Empty(PathBuf),
}

/// English stop words, same list NLTK ships as `stopwords.words('english')`.
pub static STOP_WORDS_ENGLISH: &[&str] = &[
    "i",
    "me",
    "my",
    "myself",
    "we",
    "our",
    "ours",
    "ourselves",
    "you",
    "you're",
    "you've",
    "you'll",
    "you'd",
    "your",
    "yours",
    "yourself",
    "yourselves",
    "he",
    "him",
    "his",
    "himself",
    "she",
    "she's",
    "her",
    "hers",
    "herself",
    "it",
    "it's",
    "its",
    "itself",
    "they",
    "them",
    "their",
    "theirs",
    "themselves",
    "what",
    "which",
    "who",
    "whom",
    "this",
    "that",
    "that'll",
    "these",
    "those",
    "am",
    "is",
    "are",
    "was",
    "were",
    "be",
    "been",
    "being",
    "have",
    "has",
    "had",
    "having",
    "do",
    "does",
    "did",
    "doing",
    "a",
    "an",
    "the",
    "and",
    "but",
    "if",
    "or",
    "because",
    "as",
    "until",
    "while",
    "of",
    "at",
    "by",
    "for",
    "with",
    "about",
    "against",
    "between",
    "into",
    "through",
    "during",
    "before",
    "after",
    "above",
    "below",
    "to",
    "from",
    "up",
    "down",
    "in",
    "out",
    "on",
    "off",
    "over",
    "under",
    "again",
    "further",
    "then",
    "once",
    "here",
    "there",
    "when",
    "where",
    "why",
    "how",
    "all",
    "any",
    "both",
    "each",
    "few",
    "more",
    "most",
    "other",
    "some",
    "such",
    "no",
    "nor",
    "not",
    "only",
    "own",
    "same",
    "so",
    "than",
    "too",
    "very",
    "s",
    "t",
    "can",
    "will",
    "just",
    "don",
    "don't",
    "should",
    "should've",
    "now",
    "d",
    "ll",
    "m",
    "o",
    "re",
    "ve",
    "y",
    "ain",
    "aren",
    "aren't",
    "couldn",
    "couldn't",
    "didn",
    "didn't",
    "doesn",
    "doesn't",
    "hadn",
    "hadn't",
    "hasn",
    "hasn't",
    "haven",
    "haven't",
    "isn",
    "isn't",
    "ma",
    "mightn",
    "mightn't",
    "mustn",
    "mustn't",
    "needn",
    "needn't",
    "shan",
    "shan't",
    "shouldn",
    "shouldn't",
    "wasn",
    "wasn't",
    "weren",
    "weren't",
    "won",
    "won't",
    "wouldn",
    "wouldn't",
];

pub fn english_stop_words() -> StopWords {
    STOP_WORDS_ENGLISH.iter().map(|w| w.to_string()).collect()
}

/// Reads one stop word per line. Blank lines and lines starting with `#` are ignored,
/// words are lower-cased.
pub fn load_stop_words(path: &Path) -> Result<StopWords, StopWordsError> {
    let content = fs::read_to_string(path).map_err(|source| StopWordsError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let words: StopWords = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect();

    if words.is_empty() {
        return Err(StopWordsError::Empty(path.to_path_buf()));
    }

    info!("Loaded {} stop words from {:?}", words.len(), path);

    Ok(words)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_english_stop_words() {
        let stop_words = english_stop_words();
        assert_eq!(stop_words.len(), 179);
        assert!(stop_words.contains("each"));
        assert!(stop_words.contains("in"));
        assert!(!stop_words.contains("news"));
    }

    #[test]
    fn test_load_stop_words_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom list").unwrap();
        writeln!(file, "The").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  news  ").unwrap();

        let stop_words = load_stop_words(file.path()).unwrap();
        assert_eq!(stop_words.len(), 2);
        assert!(stop_words.contains("the"));
        assert!(stop_words.contains("news"));
    }

    #[test]
    fn test_load_stop_words_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_stop_words(file.path()).unwrap_err();
        assert!(matches!(err, StopWordsError::Empty(_)));
    }

    #[test]
    fn test_load_stop_words_missing_file() {
        let err = load_stop_words(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, StopWordsError::Read { .. }));
    }
}
