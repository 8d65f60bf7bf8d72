//! Category-level TF-IDF.
//!
//! Each group (category, sentiment, ...) plays the role of one document:
//! `tf` is the raw count of a word inside the group and `idf` is
//! `ln(groups / groups containing the word)`. Words that are rare across the
//! whole corpus are pruned from every group before scoring.

use anyhow::{anyhow, Result};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::models::Tweet;
use crate::vocab::{word_counts, Stopwords, WordCounts};

/// Raw occurrence count, 0 when absent.
pub fn tf(word: &str, counts: &WordCounts) -> usize {
    counts.get(word).copied().unwrap_or(0)
}

/// Inverse group frequency. `None` when no group contains `word`, which
/// would otherwise be a division by zero.
pub fn idf<K>(word: &str, groups: &BTreeMap<K, WordCounts>) -> Option<f64> {
    let containing = groups.values().filter(|c| tf(word, c) > 0).count();
    if containing == 0 {
        return None;
    }
    Some((groups.len() as f64 / containing as f64).ln())
}

/// Borrow tweet texts grouped by `key`. Only keys present in the data appear.
pub fn group_texts<'a, K, F>(tweets: &'a [Tweet], key: F) -> BTreeMap<K, Vec<&'a str>>
where
    K: Ord,
    F: Fn(&Tweet) -> K,
{
    let mut groups: BTreeMap<K, Vec<&str>> = BTreeMap::new();
    for t in tweets {
        groups.entry(key(t)).or_default().push(t.text.as_str());
    }
    groups
}

#[derive(Debug, Clone)]
pub struct TfIdfTable<K: Ord> {
    /// Word counts over every text, used as the pruning reference.
    pub corpus: WordCounts,
    /// Per-group counts after pruning.
    pub pruned: BTreeMap<K, WordCounts>,
    /// Union of the pruned groups' words.
    pub vocabulary: BTreeSet<String>,
    /// group -> (vocabulary word -> score)
    pub scores: BTreeMap<K, BTreeMap<String, f64>>,
}

impl<K: Ord + Clone> TfIdfTable<K> {
    /// Build over `groups`, pruning against the groups' own texts.
    pub fn build<S: AsRef<str>>(
        groups: &BTreeMap<K, Vec<S>>,
        stopwords: &Stopwords,
        threshold: usize,
    ) -> Result<Self> {
        Self::build_with_corpus(groups.values().flatten(), groups, stopwords, threshold)
    }

    /// Build over `groups`, pruning against `corpus_texts`. The corpus may hold
    /// texts that belong to no group, e.g. tweets without a sentiment label.
    pub fn build_with_corpus<C, S>(
        corpus_texts: impl IntoIterator<Item = C>,
        groups: &BTreeMap<K, Vec<S>>,
        stopwords: &Stopwords,
        threshold: usize,
    ) -> Result<Self>
    where
        C: AsRef<str>,
        S: AsRef<str>,
    {
        let corpus = word_counts(corpus_texts, stopwords);

        let mut pruned: BTreeMap<K, WordCounts> = BTreeMap::new();
        for (k, texts) in groups {
            let mut counts = word_counts(texts, stopwords);
            counts.retain(|w, _| tf(w, &corpus) >= threshold);
            pruned.insert(k.clone(), counts);
        }

        let vocabulary: BTreeSet<String> =
            pruned.values().flat_map(|c| c.keys().cloned()).collect();

        let mut idfs: BTreeMap<&str, f64> = BTreeMap::new();
        for w in &vocabulary {
            let v = idf(w, &pruned)
                .ok_or_else(|| anyhow!("vocabulary word {:?} missing from every group", w))?;
            idfs.insert(w.as_str(), v);
        }

        let scores = pruned
            .iter()
            .map(|(k, counts)| {
                let row = idfs
                    .iter()
                    .map(|(w, v)| (w.to_string(), tf(w, counts) as f64 * v))
                    .collect();
                (k.clone(), row)
            })
            .collect();

        debug!(
            "TF-IDF table built - groups={}, corpus_words={}, vocabulary={}, threshold={}",
            groups.len(),
            corpus.len(),
            vocabulary.len(),
            threshold
        );

        Ok(Self {
            corpus,
            pruned,
            vocabulary,
            scores,
        })
    }

    /// Group `tweets` by `key` and build the table over those groups.
    pub fn from_tweets<F>(
        tweets: &[Tweet],
        key: F,
        stopwords: &Stopwords,
        threshold: usize,
    ) -> Result<Self>
    where
        F: Fn(&Tweet) -> K,
    {
        Self::build(&group_texts(tweets, key), stopwords, threshold)
    }

    pub fn score(&self, group: &K, word: &str) -> Option<f64> {
        self.scores.get(group)?.get(word).copied()
    }
}
