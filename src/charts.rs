use anyhow::{Context, Result};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::models::{Category, Sentiment};
use crate::report::Report;

const NEG_ON: RGBColor = RGBColor(0xff, 0x38, 0x38);
const NEG_OFF: RGBColor = RGBColor(0xf5, 0x95, 0x95);
const NEU_ON: RGBColor = RGBColor(0x00, 0x7b, 0xff);
const NEU_OFF: RGBColor = RGBColor(0x95, 0xc3, 0xf5);
const POS_ON: RGBColor = RGBColor(0x18, 0xed, 0x4a);
const POS_OFF: RGBColor = RGBColor(0xa2, 0xf2, 0xb5);
const DARK_GREEN: RGBColor = RGBColor(0x00, 0x80, 0x00);

const SIZE: (u32, u32) = (900, 600);

/// One legend entry: a set of rectangles `(x_center, bottom, top)`.
struct BarSeries {
    label: String,
    color: RGBColor,
    width: f64,
    bars: Vec<(f64, f64, f64)>,
}

/// Stack `layers` bottom-up over the same categories.
fn stacked(categories: &[Category], layers: Vec<(String, RGBColor, Vec<f64>)>) -> Vec<BarSeries> {
    let mut bottoms = vec![0.0; categories.len()];
    layers
        .into_iter()
        .map(|(label, color, values)| {
            let bars = categories
                .iter()
                .zip(values)
                .enumerate()
                .map(|(i, (c, v))| {
                    let bottom = bottoms[i];
                    bottoms[i] += v;
                    (c.0 as f64, bottom, bottom + v)
                })
                .collect();
            BarSeries { label, color, width: 0.8, bars }
        })
        .collect()
}

fn draw_bar_chart(path: &Path, title: &str, y_desc: &str, series: &[BarSeries]) -> Result<()> {
    let all = series.iter().flat_map(|s| s.bars.iter());
    let (x_min, x_max, y_max) = all.fold(
        (f64::INFINITY, f64::NEG_INFINITY, 0.0f64),
        |(lo, hi, top), &(x, _, y)| (lo.min(x), hi.max(x), top.max(y)),
    );
    let (x_min, x_max) = if x_min.is_finite() { (x_min, x_max) } else { (1.0, 1.0) };
    let y_max = if y_max > 0.0 { y_max * 1.15 } else { 1.0 };

    let root = SVGBackend::new(path, SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d((x_min - 0.7)..(x_max + 0.7), 0.0..y_max)?;

    let whole = |x: &f64| {
        if (x - x.round()).abs() < 1e-9 {
            format!("{:.0}", x)
        } else {
            String::new()
        }
    };
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_desc("Category")
        .y_desc(y_desc)
        .x_label_formatter(&whole)
        .draw()?;

    for s in series {
        let color = s.color;
        let half = s.width / 2.0;
        chart
            .draw_series(s.bars.iter().map(|&(x, y0, y1)| {
                Rectangle::new([(x - half, y0), (x + half, y1)], color.filled())
            }))?
            .label(s.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .draw()?;

    root.present()
        .with_context(|| format!("write chart {}", path.display()))?;
    Ok(())
}

/// Stacked bar: negative / neutral / positive per category.
pub fn sentiment_chart(path: &Path, report: &Report) -> Result<()> {
    let cats = report.categories();
    let col = |s: Sentiment| {
        report
            .sentiment_by_category
            .iter()
            .map(|r| r.counts.get(s) as f64)
            .collect::<Vec<_>>()
    };
    let series = stacked(
        &cats,
        vec![
            ("Negative".into(), RED, col(Sentiment::Negative)),
            ("Neutral".into(), YELLOW, col(Sentiment::Neutral)),
            ("Positive".into(), DARK_GREEN, col(Sentiment::Positive)),
        ],
    );
    draw_bar_chart(path, "Sentiment Breakdown by Category", "Counts", &series)
}

/// Stacked bar split into on/off-topic within each sentiment.
pub fn topic_chart(path: &Path, report: &Report) -> Result<()> {
    let cats: Vec<Category> = report
        .sentiment_topic_by_category
        .iter()
        .map(|r| r.category)
        .collect();
    let col = |s: Sentiment, on: bool| {
        report
            .sentiment_topic_by_category
            .iter()
            .map(|r| {
                let split = r.get(s);
                (if on { split.on_topic } else { split.off_topic }) as f64
            })
            .collect::<Vec<_>>()
    };

    let palette = [
        (Sentiment::Negative, NEG_ON, NEG_OFF),
        (Sentiment::Neutral, NEU_ON, NEU_OFF),
        (Sentiment::Positive, POS_ON, POS_OFF),
    ];
    let layers = palette
        .iter()
        .flat_map(|&(s, on_color, off_color)| {
            [
                (format!("{} - On Topic", s), on_color, col(s, true)),
                (format!("{} - Off Topic", s), off_color, col(s, false)),
            ]
        })
        .collect();

    draw_bar_chart(
        path,
        "Sentiment Breakdown by Category",
        "Counts",
        &stacked(&cats, layers),
    )
}

/// Grouped bar: mean word count per category, one bar per sentiment.
pub fn length_chart(path: &Path, report: &Report) -> Result<()> {
    let width = 0.3;
    let offsets = [
        (Sentiment::Negative, NEG_ON, -width),
        (Sentiment::Neutral, NEU_ON, 0.0),
        (Sentiment::Positive, POS_ON, width),
    ];

    let series: Vec<BarSeries> = offsets
        .iter()
        .map(|&(s, color, dx)| BarSeries {
            label: s.label().to_string(),
            color,
            width,
            bars: report
                .length_by_category
                .iter()
                .filter(|cell| cell.sentiment == s)
                .map(|cell| (cell.category.0 as f64 + dx, 0.0, cell.mean_length))
                .collect(),
        })
        .collect();

    draw_bar_chart(path, "Tweet Length by Category and Sentiment", "Length", &series)
}

/// Render all three charts into `dir`, returning the written paths.
pub fn write_charts(dir: &Path, report: &Report) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("create {:?}", dir))?;

    let jobs: [(&str, fn(&Path, &Report) -> Result<()>); 3] = [
        ("sentiment_by_category.svg", sentiment_chart),
        ("sentiment_topic_by_category.svg", topic_chart),
        ("length_by_category.svg", length_chart),
    ];

    let mut written = Vec::with_capacity(jobs.len());
    for (name, draw) in jobs {
        let path = dir.join(name);
        draw(&path, report)?;
        debug!("Chart written - path={}", path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tweet;
    use tempfile::tempdir;

    fn tweet(category: u8, sentiment: Sentiment, on_topic: bool, words: usize) -> Tweet {
        Tweet {
            time: String::new(),
            place: String::new(),
            text: String::new(),
            category: Category(category),
            sentiment: Some(sentiment),
            word_count: words,
            on_topic,
        }
    }

    #[test]
    fn test_stacked_accumulates_bottoms() {
        let cats = [Category(1), Category(2)];
        let series = stacked(
            &cats,
            vec![
                ("a".into(), RED, vec![1.0, 2.0]),
                ("b".into(), BLUE, vec![3.0, 0.0]),
            ],
        );

        assert_eq!(series[0].bars, vec![(1.0, 0.0, 1.0), (2.0, 0.0, 2.0)]);
        assert_eq!(series[1].bars, vec![(1.0, 1.0, 4.0), (2.0, 2.0, 2.0)]);
    }

    #[test]
    fn test_write_charts_emits_svgs() {
        let tweets = vec![
            tweet(1, Sentiment::Negative, true, 5),
            tweet(1, Sentiment::Positive, false, 9),
            tweet(3, Sentiment::Neutral, true, 7),
        ];
        let report = Report::build(&tweets, 1.0);
        let dir = tempdir().unwrap();

        let written = write_charts(&dir.path().join("charts"), &report).unwrap();
        assert_eq!(written.len(), 3);
        for path in written {
            let body = fs::read_to_string(&path).unwrap();
            assert!(body.contains("<svg"), "{} is not an svg", path.display());
        }
    }

    #[test]
    fn test_charts_with_no_tweets() {
        let report = Report::build(&[], 1.0);
        let dir = tempdir().unwrap();
        assert!(write_charts(dir.path(), &report).is_ok());
    }
}
