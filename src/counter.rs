use std::cmp::Reverse;
use std::sync::Arc;

use nlp::{is_alphabetic_word, TextAnalyzer};
use tracing::{debug, info};

use crate::capped_heap::CappedHeap;
use crate::types::{ArticleRecord, RankedResult, RankedWord, WordCount};

pub const DEFAULT_TOP_N: usize = 10;

/// Work performed by one category task.
///
/// The coordinator only relies on this trait, so the counting strategy can be
/// swapped (tests use it to control timing and inject failures).
pub trait CategoryCounter: Send + Sync + 'static {
    fn count(&self, category: &str, articles: &[ArticleRecord]) -> RankedResult;
}

#[derive(Clone)]
pub struct FrequencyCounter {
    analyzer: Arc<dyn TextAnalyzer>,
    top_n: usize,
}

impl FrequencyCounter {
    pub fn new(analyzer: Arc<dyn TextAnalyzer>, top_n: usize) -> Self {
        Self { analyzer, top_n }
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Tallies every qualifying word of the headlines: lower-cased, alphabetic
    /// only and not a stop word.
    pub fn word_counts(&self, articles: &[ArticleRecord]) -> WordCount {
        let mut counts = WordCount::new();
        for article in articles {
            for token in self.analyzer.tokenize(article.headline()) {
                let word = token.to_lowercase();
                if is_alphabetic_word(&word) && !self.analyzer.is_stopword(&word) {
                    counts.add(word);
                }
            }
        }
        counts
    }
}

/// The `n` most frequent words. Equal counts keep the order in which the
/// words were first seen.
pub fn rank(counts: WordCount, n: usize) -> RankedResult {
    let mut heap = CappedHeap::new(n);
    for (word, count, first_seen) in counts.tallies() {
        heap.insert((count, Reverse(first_seen)), word);
    }

    heap.into_top()
        .into_iter()
        .map(|((count, _), word)| RankedWord { word, count })
        .collect()
}

impl CategoryCounter for FrequencyCounter {
    fn count(&self, category: &str, articles: &[ArticleRecord]) -> RankedResult {
        info!("Processing category: {}", category);

        let counts = self.word_counts(articles);
        debug!(
            "Category {} has {} distinct words over {} articles",
            category,
            counts.len(),
            articles.len()
        );

        let top_words = rank(counts, self.top_n);
        info!(
            "Top words in {}: {}",
            category,
            top_words
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );

        top_words
    }
}
