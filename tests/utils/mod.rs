#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use newswords::counter::{FrequencyCounter, DEFAULT_TOP_N};
use newswords::types::{ArticleRecord, CategoryGroup};
use nlp::Tokenizer;
use serde_json::json;

pub fn init_log() {
    let _ = tracing_subscriber::fmt::try_init();
}

pub fn english_counter() -> FrequencyCounter {
    FrequencyCounter::new(Arc::new(Tokenizer::english()), DEFAULT_TOP_N)
}

const WORDS: &[&str] = &[
    "election", "market", "storm", "vaccine", "court", "senate", "rally", "budget", "launch",
    "season", "coach", "museum", "recipe", "climate", "strike",
];

/// `categories` categories named `CAT-<n>`, each with a few headlines built
/// from a shared vocabulary so that counts and ties differ between them.
pub fn sample_groups(categories: usize) -> CategoryGroup {
    let mut group = CategoryGroup::new();
    for c in 0..categories {
        for a in 0..(3 + c % 4) {
            let headline = (0..5)
                .map(|w| WORDS[(c * 7 + a * 3 + w * w) % WORDS.len()])
                .collect::<Vec<_>>()
                .join(" the ");
            group.push(ArticleRecord::new(format!("CAT-{c}"), headline));
        }
    }
    group
}

pub fn write_dataset(path: &Path, records: &[(&str, &str)]) {
    let mut file = std::fs::File::create(path).unwrap();
    for (category, headline) in records {
        let line = json!({
            "category": category,
            "headline": headline,
            "link": "https://example.com/article",
            "authors": "Staff",
            "date": "2022-09-23",
        });
        writeln!(file, "{}", line).unwrap();
    }
}
