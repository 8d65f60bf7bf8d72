use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::models::TweetRecord;
use crate::vocab::Stopwords;

/// Row shape of the spreadsheet export. Raw exports carry generic
/// `ColumnN` headers; already-renamed files use the upper-case names.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(alias = "Column1", alias = "TIME", default)]
    time: Option<String>,
    #[serde(alias = "Column2", alias = "PLACE", default)]
    place: Option<String>,
    #[serde(alias = "Column3", alias = "TWEET", default)]
    tweet: Option<String>,
    #[serde(alias = "Column4", alias = "CATEGORY", default)]
    category: Option<String>,
    #[serde(alias = "Column5", alias = "SENTIMENT", default)]
    sentiment: Option<String>,
}

impl From<RawRow> for TweetRecord {
    fn from(r: RawRow) -> Self {
        TweetRecord {
            time: r.time.unwrap_or_default(),
            place: r.place.unwrap_or_default(),
            raw_text: r.tweet.unwrap_or_default(),
            category: r.category,
            sentiment: r.sentiment.map(|s| s.trim().to_uppercase()),
        }
    }
}

/// Read every row of the tweet table. Fails on the first unreadable row.
pub fn load_tweets(path: &Path) -> Result<Vec<TweetRecord>> {
    let start = std::time::Instant::now();
    debug!("Loading tweets - path={}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)
        .with_context(|| format!("open tweet table {}", path.display()))?;

    let mut records = Vec::new();
    for (i, row) in reader.deserialize::<RawRow>().enumerate() {
        // +2: header line and 1-based numbering
        let row = row.with_context(|| format!("parse row {} of {}", i + 2, path.display()))?;
        records.push(TweetRecord::from(row));
    }

    info!(
        "Tweet table loaded - rows={}, duration={:.2}s",
        records.len(),
        start.elapsed().as_secs_f32()
    );
    Ok(records)
}

pub fn load_stopwords(path: &Path) -> Result<Stopwords> {
    let body = fs::read_to_string(path)
        .with_context(|| format!("read stopword list {}", path.display()))?;
    let stopwords = Stopwords::from_words(body.split_whitespace());
    debug!("Stopwords loaded - path={}, words={}", path.display(), stopwords.len());
    Ok(stopwords)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_raw_column_headers() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "tweets.csv",
            "Column1,Column2,Column3,Column4,Column5,Column12\n\
             10:00,Athens,Traffic is awful,2.0,b,x\n\
             10:05,Patras,Nice day,5,G,\n",
        );

        let rows = load_tweets(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].place, "Athens");
        assert_eq!(rows[0].raw_text, "Traffic is awful");
        assert_eq!(rows[0].category.as_deref(), Some("2.0"));
        assert_eq!(rows[0].sentiment.as_deref(), Some("B"));
        assert_eq!(rows[1].sentiment.as_deref(), Some("G"));
    }

    #[test]
    fn test_load_named_headers_and_short_rows() {
        let dir = tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "tweets.csv",
            "TIME,PLACE,TWEET,CATEGORY,SENTIMENT\n\
             t1,p1,hello there,1,N\n\
             t2,p2,no labels\n",
        );

        let rows = load_tweets(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].category.as_deref(), Some("1"));
        assert!(rows[1].category.is_none());
        assert!(rows[1].sentiment.is_none());
    }

    #[test]
    fn test_missing_table_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_tweets(&dir.path().join("nope.csv")).unwrap_err();
        assert!(err.to_string().contains("nope.csv"));
    }

    #[test]
    fn test_load_stopwords_whitespace_separated() {
        let dir = tempdir().unwrap();
        let path = write_file(dir.path(), "stop.txt", "the a\nAn\n\n  of\tto\n");

        let stop = load_stopwords(&path).unwrap();
        assert_eq!(stop.len(), 5);
        assert!(stop.contains("an"));
        assert!(stop.contains("of"));
        assert!(!stop.contains("cat"));
    }
}
