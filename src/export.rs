// src/export.rs
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::json;
use std::{collections::BTreeMap, fs, path::Path};

use crate::keywords::{Keyword, KeywordList};
use crate::models::{Category, Sentiment, Tweet};
use crate::orchestrator::{Analysis, AnalysisParams};

/* -------------------------------------------------------------------------- */
/* Entry point                                                                */
/* -------------------------------------------------------------------------- */

/// Write keywords.json, report.json, summary.md and tweets.csv into `out_dir`.
pub fn write_all(
    out_dir: &Path,
    analysis: &Analysis,
    params: &AnalysisParams,
    summary_md: &str,
) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {:?}", out_dir))?;

    let bundle = build_keyword_bundle(
        &analysis.keywords,
        &analysis.sentiment_keywords,
        params.threshold,
        params.top_n,
    );
    write_json(out_dir.join("keywords.json"), &bundle)?;

    write_json(out_dir.join("report.json"), &analysis.report)?;

    let md_path = out_dir.join("summary.md");
    fs::write(&md_path, summary_md).with_context(|| format!("write {:?}", md_path))?;

    write_tweets_csv(&out_dir.join("tweets.csv"), &analysis.tweets)?;

    Ok(())
}

fn write_json<P: AsRef<Path>, T: ?Sized + Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("write {:?}", path))
}

/* -------------------------------------------------------------------------- */
/* Keywords                                                                   */
/* -------------------------------------------------------------------------- */

#[derive(Serialize)]
struct VCategoryKeywords<'a> {
    category: Category,
    keywords: &'a [Keyword],
    mean: Option<f64>,
    variance: Option<f64>,
}

#[derive(Serialize)]
struct VSentimentKeywords<'a> {
    sentiment: Sentiment,
    keywords: &'a [Keyword],
}

fn build_keyword_bundle(
    keywords: &BTreeMap<Category, KeywordList>,
    sentiment_keywords: &BTreeMap<Sentiment, KeywordList>,
    threshold: usize,
    top_n: usize,
) -> serde_json::Value {
    let categories: Vec<VCategoryKeywords> = keywords
        .iter()
        .map(|(c, list)| {
            let stats = list.score_stats();
            VCategoryKeywords {
                category: *c,
                keywords: &list.keywords,
                mean: stats.map(|(m, _)| m),
                variance: stats.map(|(_, v)| v),
            }
        })
        .collect();
    let sentiments: Vec<VSentimentKeywords> = sentiment_keywords
        .iter()
        .map(|(s, list)| VSentimentKeywords {
            sentiment: *s,
            keywords: &list.keywords,
        })
        .collect();

    json!({
        "threshold": threshold,
        "top_n": top_n,
        "categories": categories,
        "sentiments": sentiments,
    })
}

/* -------------------------------------------------------------------------- */
/* Classified table                                                           */
/* -------------------------------------------------------------------------- */

#[derive(Serialize)]
struct VTweetRow<'a> {
    time: &'a str,
    place: &'a str,
    tweet: &'a str,
    category: u8,
    sentiment: Option<char>,
    tweet_length: usize,
    keyword: bool,
}

fn write_tweets_csv(path: &Path, tweets: &[Tweet]) -> Result<()> {
    let mut w = csv::Writer::from_path(path).with_context(|| format!("create {:?}", path))?;
    for t in tweets {
        w.serialize(VTweetRow {
            time: &t.time,
            place: &t.place,
            tweet: &t.text,
            category: t.category.0,
            sentiment: t.sentiment.map(Sentiment::code),
            tweet_length: t.word_count,
            keyword: t.on_topic,
        })?;
    }
    w.flush().with_context(|| format!("flush {:?}", path))?;
    Ok(())
}
