use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// One line of the dataset. Fields other than `category` and `headline` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    pub category: String,
    #[serde(default)]
    pub headline: Option<String>,
}

impl ArticleRecord {
    pub fn new(category: impl Into<String>, headline: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            headline: Some(headline.into()),
        }
    }

    pub fn headline(&self) -> &str {
        self.headline.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryArticles {
    pub category: String,
    pub articles: Vec<ArticleRecord>,
}

/// Articles grouped by category.
///
/// Categories are kept in the order they are first observed, articles keep
/// their dataset order inside each category.
#[derive(Debug, Clone, Default)]
pub struct CategoryGroup {
    groups: Vec<CategoryArticles>,
    positions: HashMap<String, usize>,
}

impl CategoryGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ArticleRecord) {
        match self.positions.get(&record.category) {
            Some(&position) => self.groups[position].articles.push(record),
            None => {
                self.positions.insert(record.category.clone(), self.groups.len());
                self.groups.push(CategoryArticles {
                    category: record.category.clone(),
                    articles: vec![record],
                });
            }
        }
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, category: &str) -> Option<&[ArticleRecord]> {
        self.positions
            .get(category)
            .map(|&position| self.groups[position].articles.as_slice())
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.category.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &CategoryArticles> {
        self.groups.iter()
    }
}

impl IntoIterator for CategoryGroup {
    type Item = CategoryArticles;
    type IntoIter = std::vec::IntoIter<CategoryArticles>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WordTally {
    count: usize,
    first_seen: usize,
}

/// Occurrences of normalized words inside a single category.
///
/// Each word remembers when it was inserted for the first time: the ranking
/// uses it to break ties between words with the same count.
#[derive(Debug, Clone, Default)]
pub struct WordCount {
    tallies: HashMap<String, WordTally>,
}

impl WordCount {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, word: String) {
        let next = self.tallies.len();
        self.tallies
            .entry(word)
            .or_insert(WordTally {
                count: 0,
                first_seen: next,
            })
            .count += 1;
    }

    pub fn get(&self, word: &str) -> Option<usize> {
        self.tallies.get(word).map(|t| t.count)
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }

    /// Words with their count and first-seen position, in no particular order.
    pub(crate) fn tallies(self) -> impl Iterator<Item = (String, usize, usize)> {
        self.tallies
            .into_iter()
            .map(|(word, tally)| (word, tally.count, tally.first_seen))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedWord {
    pub word: String,
    pub count: usize,
}

impl RankedWord {
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

impl Display for RankedWord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.word, self.count)
    }
}

/// Top words of a category, count descending, ties in first-seen order.
pub type RankedResult = Vec<RankedWord>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_group_keeps_first_seen_order() {
        let mut group = CategoryGroup::new();
        group.push(ArticleRecord::new("B", "one"));
        group.push(ArticleRecord::new("A", "two"));
        group.push(ArticleRecord::new("B", "three"));

        assert_eq!(group.len(), 2);
        assert_eq!(group.categories().collect::<Vec<_>>(), vec!["B", "A"]);
        let b: Vec<_> = group.get("B").unwrap().iter().map(|r| r.headline()).collect();
        assert_eq!(b, vec!["one", "three"]);
        assert!(group.get("C").is_none());
    }

    #[test]
    fn test_word_count_first_seen() {
        let mut counts = WordCount::new();
        counts.add("beats".to_string());
        counts.add("ai".to_string());
        counts.add("beats".to_string());

        assert_eq!(counts.len(), 2);
        assert_eq!(counts.get("beats"), Some(2));
        assert_eq!(counts.get("ai"), Some(1));
        assert_eq!(counts.get("missing"), None);

        let mut tallies: Vec<_> = counts.tallies().collect();
        tallies.sort_by_key(|(_, _, first_seen)| *first_seen);
        assert_eq!(
            tallies,
            vec![("beats".to_string(), 2, 0), ("ai".to_string(), 1, 1)]
        );
    }

    #[test]
    fn test_missing_headline() {
        let record: ArticleRecord = serde_json::from_str(r#"{"category": "tech"}"#).unwrap();
        assert_eq!(record.headline(), "");

        let record: ArticleRecord =
            serde_json::from_str(r#"{"category": "tech", "headline": null, "authors": "x"}"#)
                .unwrap();
        assert_eq!(record.headline(), "");
    }

    #[test]
    fn test_ranked_word_display() {
        assert_eq!(RankedWord::new("ai", 3).to_string(), "ai: 3");
    }
}
