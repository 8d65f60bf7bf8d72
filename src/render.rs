// src/render.rs
use std::collections::BTreeMap;

use crate::keywords::KeywordList;
use crate::models::{Category, Sentiment};
use crate::report::Report;

/// One line per category: `1: traffic (12.31), jam (8.02), ...`
pub fn render_keyword_lines(keywords: &BTreeMap<Category, KeywordList>) -> String {
    let mut out = String::new();
    for (c, list) in keywords {
        let words: Vec<String> = list
            .keywords
            .iter()
            .map(|k| format!("{} ({:.2})", k.word, k.score))
            .collect();
        out.push_str(&format!("{}: {}\n", c, words.join(", ")));
    }
    out
}

pub fn render_summary_markdown(
    report: &Report,
    keywords: &BTreeMap<Category, KeywordList>,
    sentiment_keywords: &BTreeMap<Sentiment, KeywordList>,
) -> String {
    let mut md = String::new();
    md.push_str("# Tweet Topic Summary\n\n");

    let rate = if report.tweets > 0 {
        report.on_topic as f64 / report.tweets as f64 * 100.0
    } else {
        0.0
    };
    md.push_str(&format!(
        "{} tweets, {} on-topic ({:.1}%).\n\n",
        report.tweets, report.on_topic, rate
    ));

    md.push_str("## Keywords by Category\n");
    for (c, list) in keywords {
        md.push_str(&format!("\n### Category {}\n", c));
        if list.is_empty() {
            md.push_str("_no keywords above the pruning threshold_\n");
            continue;
        }
        for k in &list.keywords {
            md.push_str(&format!("- {} ({:.2})\n", k.word, k.score));
        }
        if let Some((mean, var)) = list.score_stats() {
            md.push_str(&format!("\nmean {:.2}, variance {:.2}\n", mean, var));
        }
    }
    md.push('\n');

    if !sentiment_keywords.is_empty() {
        md.push_str("## Keywords by Sentiment\n");
        for (s, list) in sentiment_keywords {
            let words: Vec<&str> = list.words().collect();
            md.push_str(&format!("- **{}**: {}\n", s, words.join(", ")));
        }
        md.push('\n');
    }

    md.push_str("## Sentiment by Category\n");
    md.push_str("| Category | Negative | Neutral | Positive |\n|---|---|---|---|\n");
    for row in &report.sentiment_by_category {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            row.category, row.counts.negative, row.counts.neutral, row.counts.positive
        ));
    }
    md.push('\n');

    md.push_str("## On-Topic by Category and Sentiment\n");
    md.push_str("| Category | Sentiment | On | Off |\n|---|---|---|---|\n");
    for row in &report.sentiment_topic_by_category {
        for s in Sentiment::ALL {
            let split = row.get(s);
            md.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                row.category, s, split.on_topic, split.off_topic
            ));
        }
    }
    md.push('\n');

    md.push_str("## Mean Tweet Length\n");
    md.push_str("| Sentiment | Category | Tweets | Words | On-topic |\n|---|---|---|---|---|\n");
    for cell in &report.length_by_category {
        md.push_str(&format!(
            "| {} | {} | {} | {:.2} | {:.0}% |\n",
            cell.sentiment,
            cell.category,
            cell.tweets,
            cell.mean_length,
            cell.on_topic_rate * 100.0
        ));
    }

    md
}
