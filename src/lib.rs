//! # tweet_topics
//!
//! Keyword analysis for annotated tweets: every tweet carries a topic
//! category and a sentiment code. Categories are treated as documents for a
//! TF-IDF score, the best words of each category become its keywords, and a
//! tweet is on-topic when it uses one of its own category's keywords.
//!
//! ## Modules
//!
//! - `load` - tweet table and stopword list
//! - `clean` - category whitelist and text normalization
//! - `vocab` - tokenization and word counts
//! - `tfidf` - per-group TF-IDF table
//! - `keywords` - top keywords and on-topic classification
//! - `report`, `render`, `charts`, `export` - aggregates and outputs
//! - `orchestrator` - the whole run, start to finish

pub mod charts;
pub mod clean;
pub mod export;
pub mod keywords;
pub mod load;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod report;
pub mod tfidf;
pub mod vocab;

pub use keywords::{classify, top_keywords, KeywordList};
pub use models::{Category, CategorySet, Sentiment, Tweet, TweetRecord};
pub use orchestrator::{analyze, run_analysis, Analysis, AnalysisParams};
pub use tfidf::{idf, tf, TfIdfTable};
pub use vocab::{word_counts, Stopwords};
