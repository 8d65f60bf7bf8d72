use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::charts::write_charts;
use crate::clean::clean_tweets;
use crate::export::write_all;
use crate::keywords::{classify, top_keywords, KeywordList};
use crate::load::{load_stopwords, load_tweets};
use crate::models::{Category, CategorySet, Sentiment, Tweet, TweetRecord};
use crate::render::render_summary_markdown;
use crate::report::Report;
use crate::tfidf::TfIdfTable;
use crate::vocab::Stopwords;

pub struct AnalysisParams {
    pub threshold: usize,    // minimum corpus-wide count, e.g. 5
    pub top_n: usize,        // keywords per category, e.g. 10
    pub categories: CategorySet,
    pub scale_factor: f64,   // multiplier for on/off-topic counts
    pub charts: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            threshold: 5,
            top_n: 10,
            categories: CategorySet::default(),
            scale_factor: 1.0,
            charts: true,
        }
    }
}

pub struct Analysis {
    pub tweets: Vec<Tweet>,
    pub table: TfIdfTable<Category>,
    pub keywords: BTreeMap<Category, KeywordList>,
    pub sentiment_keywords: BTreeMap<Sentiment, KeywordList>,
    pub report: Report,
}

/// Clean, score, classify and aggregate. No I/O.
pub fn analyze(
    records: &[TweetRecord],
    stopwords: &Stopwords,
    params: &AnalysisParams,
) -> Result<Analysis> {
    // 1) clean
    let mut tweets = clean_tweets(records, &params.categories);
    if tweets.is_empty() {
        bail!(
            "No tweets left after cleaning ({} rows read, none in categories {:?})",
            records.len(),
            params.categories.iter().map(|c| c.0).collect::<Vec<_>>()
        );
    }
    let dropped = records.len() - tweets.len();
    if dropped > 0 {
        info!("Cleaning - retained={}, dropped={}", tweets.len(), dropped);
    }

    // 2) category TF-IDF + keywords
    let start = std::time::Instant::now();
    let table = TfIdfTable::from_tweets(&tweets, |t| t.category, stopwords, params.threshold)?;
    let keywords = top_keywords(&table, params.top_n);
    info!(
        "TF-IDF completed - duration={:.2}s, categories={}, vocabulary={}",
        start.elapsed().as_secs_f32(),
        table.scores.len(),
        table.vocabulary.len()
    );
    for (c, list) in &keywords {
        if list.is_empty() {
            warn!("No keywords for category {} - threshold={} too high?", c, params.threshold);
        }
    }

    // 2.5) same scoring per sentiment, for the summary only.
    // Unlabeled tweets still count towards pruning.
    let sentiment_keywords = {
        let mut by_sentiment: BTreeMap<Sentiment, Vec<&str>> = BTreeMap::new();
        for t in &tweets {
            if let Some(s) = t.sentiment {
                by_sentiment.entry(s).or_default().push(t.text.as_str());
            }
        }
        let sentiment_table = TfIdfTable::build_with_corpus(
            tweets.iter().map(|t| t.text.as_str()),
            &by_sentiment,
            stopwords,
            params.threshold,
        )?;
        top_keywords(&sentiment_table, params.top_n)
    };
    debug!("Sentiment keywords - groups={}", sentiment_keywords.len());

    // 3) on-topic flags
    classify(&mut tweets, &keywords);

    // 4) aggregates
    let report = Report::build(&tweets, params.scale_factor);
    info!(
        "Report built - tweets={}, on_topic={}, categories={}",
        report.tweets,
        report.on_topic,
        report.sentiment_by_category.len()
    );

    Ok(Analysis {
        tweets,
        table,
        keywords,
        sentiment_keywords,
        report,
    })
}

/// Load inputs, analyze, and write every output under `output_dir`.
pub fn run_analysis(
    data_path: &Path,
    stopwords_path: &Path,
    output_dir: &Path,
    params: &AnalysisParams,
) -> Result<Analysis> {
    let pipeline_start = std::time::Instant::now();
    info!(
        "Pipeline started - data={}, threshold={}, top_n={}",
        data_path.display(),
        params.threshold,
        params.top_n
    );

    let records = load_tweets(data_path)?;
    let stopwords = load_stopwords(stopwords_path)?;

    let analysis = analyze(&records, &stopwords, params)?;

    let summary = render_summary_markdown(
        &analysis.report,
        &analysis.keywords,
        &analysis.sentiment_keywords,
    );
    write_all(output_dir, &analysis, params, &summary)?;

    if params.charts {
        let written = write_charts(output_dir, &analysis.report)?;
        info!("Charts rendered - count={}", written.len());
    } else {
        debug!("Chart rendering disabled");
    }

    info!(
        "Pipeline completed - duration={:.2}s, output_dir={}",
        pipeline_start.elapsed().as_secs_f32(),
        output_dir.display()
    );
    Ok(analysis)
}
