use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};

use tweet_topics::render::render_keyword_lines;
use tweet_topics::{run_analysis, AnalysisParams, Category, CategorySet};

/// Tweet Topics - per-category TF-IDF keywords and on-topic tagging
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tweet table (CSV export of the annotated spreadsheet; overrides TWEETS_DATA)
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Whitespace-separated stopword list (overrides TWEETS_STOPWORDS)
    #[arg(short, long)]
    stopwords: Option<PathBuf>,

    /// Output directory for generated files (default: "out")
    #[arg(short, long, default_value = "out")]
    output_dir: PathBuf,

    /// Minimum corpus-wide count for a word to be scored
    #[arg(long, default_value_t = 5)]
    threshold: usize,

    /// Keywords kept per category
    #[arg(long, default_value_t = 10)]
    top_n: usize,

    /// Valid category labels, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = vec![1u8, 2, 3, 4, 5])]
    categories: Vec<u8>,

    /// Multiplier applied to the on/off-topic counts
    #[arg(long, default_value_t = 1.0)]
    scale_factor: f64,

    /// Skip SVG chart rendering
    #[arg(long)]
    no_charts: bool,
}

/// CLI flag first, then environment, then the conventional location.
fn resolve_path(flag: Option<PathBuf>, env_key: &str, default: &str) -> PathBuf {
    if let Some(p) = flag {
        debug!("Using {} from command line: {}", env_key, p.display());
        return p;
    }
    if let Ok(p) = std::env::var(env_key) {
        debug!("Using {} from environment: {}", env_key, p);
        return PathBuf::from(p);
    }
    PathBuf::from(default)
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();

    let args = Args::parse();
    info!("Starting tweet_topics");

    let data_path = resolve_path(args.data, "TWEETS_DATA", "data/tweets.csv");
    let stopwords_path = resolve_path(args.stopwords, "TWEETS_STOPWORDS", "data/stopwords.txt");

    // Friendlier error if missing
    for (what, p) in [("tweet table", &data_path), ("stopword list", &stopwords_path)] {
        if !p.exists() {
            return Err(anyhow::anyhow!(
                "{} not found at {}\n\
                 Pass it explicitly (--data / --stopwords) or set TWEETS_DATA / TWEETS_STOPWORDS.",
                what,
                p.display()
            ));
        }
    }

    let params = AnalysisParams {
        threshold: args.threshold,
        top_n: args.top_n,
        categories: CategorySet::new(args.categories.into_iter().map(Category)),
        scale_factor: args.scale_factor,
        charts: !args.no_charts,
    };

    let analysis = run_analysis(&data_path, &stopwords_path, &args.output_dir, &params)?;
    print!("{}", render_keyword_lines(&analysis.keywords));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["tweet_topics"]);
        assert_eq!(args.threshold, 5);
        assert_eq!(args.top_n, 10);
        assert_eq!(args.categories, vec![1, 2, 3, 4, 5]);
        assert_eq!(args.output_dir, PathBuf::from("out"));
        assert!(!args.no_charts);
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::parse_from([
            "tweet_topics",
            "--data",
            "t.csv",
            "--categories",
            "2,4",
            "--threshold",
            "3",
            "--no-charts",
        ]);
        assert_eq!(args.data, Some(PathBuf::from("t.csv")));
        assert_eq!(args.categories, vec![2, 4]);
        assert_eq!(args.threshold, 3);
        assert!(args.no_charts);
    }

    #[test]
    fn test_resolve_path_prefers_flag() {
        let p = resolve_path(Some(PathBuf::from("x.csv")), "TWEETS_TEST_UNSET", "d.csv");
        assert_eq!(p, PathBuf::from("x.csv"));
        let p = resolve_path(None, "TWEETS_TEST_UNSET", "d.csv");
        assert_eq!(p, PathBuf::from("d.csv"));
    }
}
