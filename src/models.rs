use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Topic label assigned by the annotators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(pub u8);

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whitelist of categories that survive cleaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySet {
    allowed: BTreeSet<Category>,
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new((1..=5).map(Category))
    }
}

impl CategorySet {
    pub fn new(allowed: impl IntoIterator<Item = Category>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }

    pub fn contains(&self, c: Category) -> bool {
        self.allowed.contains(&c)
    }

    pub fn iter(&self) -> impl Iterator<Item = Category> + '_ {
        self.allowed.iter().copied()
    }

    /// Parse a raw spreadsheet cell. Integral floats ("3.0") are accepted,
    /// anything else outside the whitelist is rejected.
    pub fn parse_cell(&self, raw: &str) -> Option<Category> {
        let v: f64 = raw.trim().parse().ok()?;
        if v.fract() != 0.0 || !(0.0..=u8::MAX as f64).contains(&v) {
            return None;
        }
        let c = Category(v as u8);
        self.contains(c).then_some(c)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Negative,
    Neutral,
    Positive,
}

impl Sentiment {
    pub const ALL: [Sentiment; 3] = [Sentiment::Negative, Sentiment::Neutral, Sentiment::Positive];

    /// Single-letter annotation code: B(ad), N(eutral), G(ood).
    pub fn code(self) -> char {
        match self {
            Sentiment::Negative => 'B',
            Sentiment::Neutral => 'N',
            Sentiment::Positive => 'G',
        }
    }

    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "B" => Some(Sentiment::Negative),
            "N" => Some(Sentiment::Neutral),
            "G" => Some(Sentiment::Positive),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
            Sentiment::Positive => "Positive",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row as it comes out of the spreadsheet export, before any filtering.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TweetRecord {
    pub time: String,
    pub place: String,
    pub raw_text: String,
    pub category: Option<String>,
    pub sentiment: Option<String>,
}

/// A tweet that passed the category whitelist, with normalized text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tweet {
    pub time: String,
    pub place: String,
    pub text: String,
    pub category: Category,
    pub sentiment: Option<Sentiment>,
    pub word_count: usize,
    pub on_topic: bool,
}
