use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};

/// word -> occurrences
pub type WordCounts = BTreeMap<String, usize>;

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^0-9a-zA-Z]+").unwrap());

/// Replace every run of non-ASCII-alphanumeric characters with one space
/// and lowercase the result.
pub fn normalize_text(text: &str) -> String {
    NON_ALNUM.replace_all(text, " ").to_lowercase()
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: HashSet<String>,
}

impl Stopwords {
    /// Entries are lowercased so they match the lowercased tokens.
    pub fn from_words<S: AsRef<str>>(words: impl IntoIterator<Item = S>) -> Self {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Tokens that count towards a vocabulary: no stopwords, no bare numbers.
pub fn qualifying_tokens<'a>(
    normalized: &'a str,
    stopwords: &'a Stopwords,
) -> impl Iterator<Item = &'a str> + 'a {
    normalized
        .split_whitespace()
        .filter(move |t| !is_numeric(t) && !stopwords.contains(t))
}

/// Count qualifying tokens across a collection of texts.
pub fn word_counts<S: AsRef<str>>(
    texts: impl IntoIterator<Item = S>,
    stopwords: &Stopwords,
) -> WordCounts {
    let joined = texts
        .into_iter()
        .map(|t| t.as_ref().to_owned())
        .join(" ");
    let normalized = normalize_text(&joined);

    let mut counts = WordCounts::new();
    for token in qualifying_tokens(&normalized, stopwords) {
        *counts.entry(token.to_string()).or_insert(0) += 1;
    }
    counts
}
