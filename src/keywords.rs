use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::models::{Category, Tweet};
use crate::tfidf::TfIdfTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Keyword {
    pub word: String,
    pub score: f64,
}

/// Highest-scoring words of one group, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeywordList {
    pub keywords: Vec<Keyword>,
}

impl KeywordList {
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(|k| k.word.as_str())
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Mean and population variance of the keyword scores.
    pub fn score_stats(&self) -> Option<(f64, f64)> {
        if self.keywords.is_empty() {
            return None;
        }
        let n = self.keywords.len() as f64;
        let mean = self.keywords.iter().map(|k| k.score).sum::<f64>() / n;
        let var = self
            .keywords
            .iter()
            .map(|k| (k.score - mean).powi(2))
            .sum::<f64>()
            / n;
        Some((mean, var))
    }
}

/// Descending by score, ascending by word on ties.
fn rank(a: &Keyword, b: &Keyword) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| a.word.cmp(&b.word))
}

pub fn top_keywords<K: Ord + Clone>(table: &TfIdfTable<K>, n: usize) -> BTreeMap<K, KeywordList> {
    table
        .scores
        .iter()
        .map(|(group, row)| {
            let mut keywords: Vec<Keyword> = row
                .iter()
                .map(|(w, s)| Keyword {
                    word: w.clone(),
                    score: *s,
                })
                .collect();
            keywords.sort_by(rank);
            keywords.truncate(n);
            (group.clone(), KeywordList { keywords })
        })
        .collect()
}

/// True when the tweet shares at least one token with the keyword list.
pub fn mentions_keyword<'a>(text: &str, keywords: impl IntoIterator<Item = &'a str>) -> bool {
    let tokens: HashSet<&str> = text.split_whitespace().collect();
    keywords.into_iter().any(|k| tokens.contains(k))
}

/// Set `on_topic` on every tweet using its own category's keywords.
pub fn classify(tweets: &mut [Tweet], keywords: &BTreeMap<Category, KeywordList>) {
    let mut on_topic = 0usize;
    for t in tweets.iter_mut() {
        t.on_topic = keywords
            .get(&t.category)
            .map(|list| mentions_keyword(&t.text, list.words()))
            .unwrap_or(false);
        if t.on_topic {
            on_topic += 1;
        }
    }
    debug!("Classified tweets - total={}, on_topic={}", tweets.len(), on_topic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::Stopwords;

    fn table(rows: &[(u8, &[(&str, f64)])]) -> TfIdfTable<Category> {
        let scores = rows
            .iter()
            .map(|(g, words)| {
                let row = words.iter().map(|(w, s)| (w.to_string(), *s)).collect();
                (Category(*g), row)
            })
            .collect();
        TfIdfTable {
            corpus: Default::default(),
            pruned: Default::default(),
            vocabulary: Default::default(),
            scores,
        }
    }

    fn tweet(text: &str, category: u8) -> Tweet {
        Tweet {
            time: String::new(),
            place: String::new(),
            text: text.into(),
            category: Category(category),
            sentiment: None,
            word_count: text.split_whitespace().count(),
            on_topic: false,
        }
    }

    fn words(list: &KeywordList) -> Vec<&str> {
        list.words().collect()
    }

    #[test]
    fn test_top_keywords_sorted_and_truncated() {
        let t = table(&[(1, &[("a", 0.5), ("b", 2.0), ("c", 1.0), ("d", 0.0)])]);
        let top = top_keywords(&t, 3);

        let list = &top[&Category(1)];
        assert_eq!(words(list), vec!["b", "c", "a"]);
        assert!(list.keywords.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_top_keywords_ties_break_on_word() {
        let t = table(&[(1, &[("zeta", 1.0), ("alpha", 1.0), ("mid", 1.0), ("top", 3.0)])]);
        let top = top_keywords(&t, 3);
        assert_eq!(words(&top[&Category(1)]), vec!["top", "alpha", "mid"]);
    }

    #[test]
    fn test_top_keywords_shorter_than_n() {
        let t = table(&[(1, &[("x", 1.0)]), (2, &[])]);
        let top = top_keywords(&t, 10);
        assert_eq!(top[&Category(1)].len(), 1);
        assert!(top[&Category(2)].is_empty());
    }

    #[test]
    fn test_top_keywords_from_built_table() {
        let groups = BTreeMap::from([
            (Category(1), vec!["fire fire smoke", "fire alarm"]),
            (Category(2), vec!["flood rain", "rain smoke"]),
        ]);
        let t = TfIdfTable::build(&groups, &Stopwords::default(), 1).unwrap();
        let top = top_keywords(&t, 2);

        assert_eq!(words(&top[&Category(1)]), vec!["fire", "alarm"]);
        assert_eq!(words(&top[&Category(2)]), vec!["rain", "flood"]);
    }

    #[test]
    fn test_score_stats() {
        let t = table(&[(1, &[("a", 1.0), ("b", 3.0)])]);
        let top = top_keywords(&t, 10);
        let (mean, var) = top[&Category(1)].score_stats().unwrap();
        assert!((mean - 2.0).abs() < 1e-12);
        assert!((var - 1.0).abs() < 1e-12);

        assert_eq!(KeywordList { keywords: vec![] }.score_stats(), None);
    }

    #[test]
    fn test_mentions_keyword_is_token_match() {
        assert!(mentions_keyword("heavy traffic today", ["traffic", "jam"]));
        assert!(!mentions_keyword("trafficking news", ["traffic"]));
        assert!(!mentions_keyword("anything", std::iter::empty()));
        assert!(!mentions_keyword("", ["traffic"]));
    }

    #[test]
    fn test_classify_uses_own_category() {
        let t = table(&[(1, &[("traffic", 2.0)]), (2, &[("beach", 2.0)])]);
        let top = top_keywords(&t, 10);
        let mut tweets = vec![
            tweet("traffic again", 1),
            tweet("beach day", 1),
            tweet("beach day", 2),
            tweet("traffic again", 2),
            tweet("traffic again", 3),
        ];

        classify(&mut tweets, &top);
        let flags: Vec<bool> = tweets.iter().map(|t| t.on_topic).collect();
        assert_eq!(flags, vec![true, false, true, false, false]);
    }
}
