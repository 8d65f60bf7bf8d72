use tracing::debug;

use crate::models::{CategorySet, Sentiment, Tweet, TweetRecord};
use crate::vocab::normalize_text;

/// Keep rows whose category is whitelisted, normalize their text and derive
/// the word count. Rows outside the whitelist are dropped without error.
pub fn clean_tweets(records: &[TweetRecord], categories: &CategorySet) -> Vec<Tweet> {
    let mut dropped = 0usize;
    let mut unlabeled = 0usize;

    let tweets: Vec<Tweet> = records
        .iter()
        .filter_map(|r| {
            let category = r.category.as_deref().and_then(|c| categories.parse_cell(c));
            let Some(category) = category else {
                dropped += 1;
                return None;
            };
            let sentiment = r.sentiment.as_deref().and_then(Sentiment::from_code);
            if sentiment.is_none() {
                unlabeled += 1;
            }
            let text = normalize_text(&r.raw_text);
            Some(Tweet {
                time: r.time.clone(),
                place: r.place.clone(),
                word_count: text.split_whitespace().count(),
                text,
                category,
                sentiment,
                on_topic: false,
            })
        })
        .collect();

    debug!(
        "Cleaning - kept={}, dropped={} (category not whitelisted), without_sentiment={}",
        tweets.len(),
        dropped,
        unlabeled
    );
    tweets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn record(text: &str, category: Option<&str>, sentiment: Option<&str>) -> TweetRecord {
        TweetRecord {
            time: "t".into(),
            place: "p".into(),
            raw_text: text.into(),
            category: category.map(String::from),
            sentiment: sentiment.map(String::from),
        }
    }

    #[test]
    fn test_drops_rows_outside_whitelist() {
        let records = vec![
            record("one", Some("1"), Some("B")),
            record("six", Some("6"), Some("B")),
            record("half", Some("2.5"), Some("N")),
            record("none", None, Some("G")),
            record("junk", Some("abc"), Some("G")),
            record("five", Some("5.0"), Some("G")),
        ];

        let tweets = clean_tweets(&records, &CategorySet::default());
        let cats: Vec<Category> = tweets.iter().map(|t| t.category).collect();
        assert_eq!(cats, vec![Category(1), Category(5)]);
    }

    #[test]
    fn test_custom_category_set() {
        let records = vec![record("a", Some("1"), None), record("b", Some("7"), None)];
        let set = CategorySet::new([Category(7)]);

        let tweets = clean_tweets(&records, &set);
        assert_eq!(tweets.len(), 1);
        assert_eq!(tweets[0].category, Category(7));
    }

    #[test]
    fn test_text_is_normalized_and_counted() {
        let records = vec![record("RT @user: Traffic on #Kifisias!! 10km", Some("3"), Some("b"))];
        let tweets = clean_tweets(&records, &CategorySet::default());

        assert_eq!(tweets[0].text, "rt user traffic on kifisias 10km");
        assert_eq!(tweets[0].word_count, 6);
        assert_eq!(tweets[0].sentiment, Some(Sentiment::Negative));
        assert!(!tweets[0].on_topic);
    }

    #[test]
    fn test_unknown_sentiment_kept_without_label() {
        let records = vec![record("hi", Some("2"), Some("X")), record("yo", Some("2"), None)];
        let tweets = clean_tweets(&records, &CategorySet::default());

        assert_eq!(tweets.len(), 2);
        assert!(tweets.iter().all(|t| t.sentiment.is_none()));
    }
}
