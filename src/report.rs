use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Category, Sentiment, Tweet};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentCounts {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
}

impl SentimentCounts {
    pub fn get(&self, s: Sentiment) -> usize {
        match s {
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Positive => self.positive,
        }
    }

    fn bump(&mut self, s: Sentiment) {
        match s {
            Sentiment::Negative => self.negative += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Positive => self.positive += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorySentiment {
    pub category: Category,
    pub counts: SentimentCounts,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TopicSplit {
    pub on_topic: usize,
    pub off_topic: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTopicSplit {
    pub category: Category,
    pub negative: TopicSplit,
    pub neutral: TopicSplit,
    pub positive: TopicSplit,
}

impl CategoryTopicSplit {
    pub fn get(&self, s: Sentiment) -> TopicSplit {
        match s {
            Sentiment::Negative => self.negative,
            Sentiment::Neutral => self.neutral,
            Sentiment::Positive => self.positive,
        }
    }
}

/// Mean length and on-topic share of one (sentiment, category) cell.
#[derive(Debug, Clone, Serialize)]
pub struct LengthCell {
    pub sentiment: Sentiment,
    pub category: Category,
    pub tweets: usize,
    pub mean_length: f64,
    pub on_topic_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub tweets: usize,
    pub on_topic: usize,
    pub sentiment_by_category: Vec<CategorySentiment>,
    pub sentiment_topic_by_category: Vec<CategoryTopicSplit>,
    pub length_by_category: Vec<LengthCell>,
}

impl Report {
    pub fn build(tweets: &[Tweet], scale_factor: f64) -> Self {
        Report {
            tweets: tweets.len(),
            on_topic: tweets.iter().filter(|t| t.on_topic).count(),
            sentiment_by_category: sentiment_by_category(tweets),
            sentiment_topic_by_category: sentiment_topic_by_category(tweets, scale_factor),
            length_by_category: length_by_category(tweets),
        }
    }

    /// Categories present in the data, ascending.
    pub fn categories(&self) -> Vec<Category> {
        self.sentiment_by_category.iter().map(|c| c.category).collect()
    }

    pub fn length_cell(&self, s: Sentiment, c: Category) -> Option<&LengthCell> {
        self.length_by_category
            .iter()
            .find(|cell| cell.sentiment == s && cell.category == c)
    }
}

fn by_category(tweets: &[Tweet]) -> BTreeMap<Category, Vec<&Tweet>> {
    tweets.iter().map(|t| (t.category, t)).into_group_map().into_iter().collect()
}

pub fn sentiment_by_category(tweets: &[Tweet]) -> Vec<CategorySentiment> {
    by_category(tweets)
        .into_iter()
        .map(|(category, group)| {
            let mut counts = SentimentCounts::default();
            for s in group.iter().filter_map(|t| t.sentiment) {
                counts.bump(s);
            }
            CategorySentiment { category, counts }
        })
        .collect()
}

/// On/off-topic counts per sentiment, each scaled and truncated.
pub fn sentiment_topic_by_category(tweets: &[Tweet], scale_factor: f64) -> Vec<CategoryTopicSplit> {
    let split = |group: &[&Tweet], s: Sentiment| {
        let (on, off): (Vec<&&Tweet>, Vec<&&Tweet>) = group
            .iter()
            .filter(|t| t.sentiment == Some(s))
            .partition(|t| t.on_topic);
        TopicSplit {
            on_topic: (on.len() as f64 * scale_factor) as usize,
            off_topic: (off.len() as f64 * scale_factor) as usize,
        }
    };

    by_category(tweets)
        .into_iter()
        .map(|(category, group)| CategoryTopicSplit {
            category,
            negative: split(group.as_slice(), Sentiment::Negative),
            neutral: split(group.as_slice(), Sentiment::Neutral),
            positive: split(group.as_slice(), Sentiment::Positive),
        })
        .collect()
}

/// Cells ordered by sentiment then category; empty cells are omitted.
pub fn length_by_category(tweets: &[Tweet]) -> Vec<LengthCell> {
    let mut cells: BTreeMap<(Sentiment, Category), Vec<&Tweet>> = BTreeMap::new();
    for t in tweets {
        if let Some(s) = t.sentiment {
            cells.entry((s, t.category)).or_default().push(t);
        }
    }

    cells
        .into_iter()
        .map(|((sentiment, category), group)| {
            let n = group.len() as f64;
            LengthCell {
                sentiment,
                category,
                tweets: group.len(),
                mean_length: group.iter().map(|t| t.word_count as f64).sum::<f64>() / n,
                on_topic_rate: group.iter().filter(|t| t.on_topic).count() as f64 / n,
            }
        })
        .collect()
}
