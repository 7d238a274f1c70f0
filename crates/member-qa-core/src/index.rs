//! TF-IDF vector index over unigram and bigram features.
//!
//! # Feature extraction
//!
//! 1. Lowercase and split into word tokens of at least two characters.
//! 2. Drop [`ENGLISH_STOP_WORDS`].
//! 3. Emit every surviving token plus every adjacent pair (`"new bistro"`).
//!
//! # Weighting
//!
//! `weight = tf × idf` with raw counts for `tf` and the smoothed
//! `idf = ln((1 + n) / (1 + df)) + 1`. Each vector is L2-normalized, so the
//! dot product used by [`TfIdfIndex::score`] is the cosine similarity.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use anyhow::{bail, Result};

use crate::text::{word_tokens, ENGLISH_STOP_WORDS};

/// A sparse vector, sorted by feature id.
type SparseVec = Vec<(usize, f64)>;

/// Fitted TF-IDF model plus the weighted vector of every indexed document.
///
/// An index only exists once fitted, so scoring an unbuilt index is not
/// representable.
#[derive(Debug, Clone)]
pub struct TfIdfIndex {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVec>,
}

impl TfIdfIndex {
    /// Fit the model over `documents` and weight each of them.
    ///
    /// Fails on an empty document list.
    pub fn fit(documents: &[String]) -> Result<Self> {
        if documents.is_empty() {
            bail!("cannot build an index over an empty corpus");
        }

        let analyzed: Vec<Vec<String>> = documents.iter().map(|d| analyze(d)).collect();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut df: Vec<usize> = Vec::new();
        for features in &analyzed {
            let unique: HashSet<&String> = features.iter().collect();
            for feature in unique {
                let id = match vocabulary.get(feature) {
                    Some(&id) => id,
                    None => {
                        let id = df.len();
                        vocabulary.insert(feature.clone(), id);
                        df.push(0);
                        id
                    }
                };
                df[id] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf: Vec<f64> = df
            .iter()
            .map(|&d| ((1.0 + n) / (1.0 + d as f64)).ln() + 1.0)
            .collect();

        let mut index = Self {
            vocabulary,
            idf,
            rows: Vec::with_capacity(analyzed.len()),
        };
        index.rows = analyzed.iter().map(|f| index.weigh(f)).collect();

        Ok(index)
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Always false for a fitted index.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct unigram and bigram features.
    pub fn feature_count(&self) -> usize {
        self.idf.len()
    }

    /// Score `query` against every document (one value per document, in
    /// corpus order).
    ///
    /// Out-of-vocabulary features are ignored; a query with none in the
    /// vocabulary scores `0.0` everywhere.
    pub fn score(&self, query: &str) -> Vec<f64> {
        let q: HashMap<usize, f64> = self.weigh(&analyze(query)).into_iter().collect();

        if q.is_empty() {
            return vec![0.0; self.rows.len()];
        }

        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|(id, w)| q.get(id).map(|qw| qw * w))
                    .sum()
            })
            .collect()
    }

    /// Turn a feature list into an L2-normalized TF-IDF vector.
    fn weigh(&self, features: &[String]) -> SparseVec {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for f in features {
            if let Some(&id) = self.vocabulary.get(f) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }

        let mut row: SparseVec = counts
            .into_iter()
            .map(|(id, tf)| (id, tf * self.idf[id]))
            .collect();
        row.sort_by_key(|(id, _)| *id);

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, w) in row.iter_mut() {
                *w /= norm;
            }
        }
        row
    }
}

/// [`ENGLISH_STOP_WORDS`] as a set, built on first use.
fn english_stop_words() -> &'static HashSet<&'static str> {
    static STOP_WORDS: OnceLock<HashSet<&'static str>> = OnceLock::new();
    STOP_WORDS.get_or_init(|| ENGLISH_STOP_WORDS.iter().copied().collect())
}

/// Unigram and bigram features of `text`.
fn analyze(text: &str) -> Vec<String> {
    let stop = english_stop_words();
    let tokens: Vec<String> = word_tokens(text)
        .filter(|t| t.chars().count() >= 2 && !stop.contains(t.as_str()))
        .collect();

    let mut features = tokens.clone();
    features.extend(tokens.windows(2).map(|pair| format!("{} {}", pair[0], pair[1])));
    features
}
