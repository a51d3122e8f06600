//! TF-IDF vectorizer
//!
//! Vocabulary indices follow lexicographic term order so a vectorizer fitted
//! twice on the same corpus produces identical feature layouts.

use crate::text::analyze;
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Vectorizer options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TfidfOptions {
    /// Lowercase text before tokenizing
    pub lowercase: bool,
    /// Remove English stop words
    pub stop_words: bool,
    /// Use `1 + ln(tf)` instead of raw counts
    pub sublinear_tf: bool,
    /// Add one to document frequencies as if an extra document held every term
    pub smooth_idf: bool,
}

impl Default for TfidfOptions {
    fn default() -> Self {
        Self {
            lowercase: true,
            stop_words: true,
            sublinear_tf: false,
            smooth_idf: true,
        }
    }
}

/// Sparse row: `(feature index, value)` pairs sorted by index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from pairs; sorts by index
    pub fn from_pairs(mut entries: Vec<(usize, f64)>) -> Self {
        entries.sort_by_key(|(index, _)| *index);
        Self { entries }
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest index plus one, or zero when empty
    pub fn min_width(&self) -> usize {
        self.entries.last().map(|(i, _)| i + 1).unwrap_or(0)
    }

    /// Dot product with a dense row
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|(index, value)| value * dense[*index])
            .sum()
    }
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    options: TfidfOptions,
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    /// Learn vocabulary and inverse document frequencies
    pub fn fit<S: AsRef<str>>(documents: &[S], options: TfidfOptions) -> Result<Self> {
        if documents.is_empty() {
            return Err(CoreError::EmptyDataset);
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for document in documents {
            let terms: BTreeSet<String> =
                analyze(document.as_ref(), options.lowercase, options.stop_words)
                    .into_iter()
                    .collect();
            for term in terms {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(CoreError::EmptyVocabulary);
        }

        let n = documents.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());

        // BTreeMap iteration is sorted, so indices follow term order
        for (index, (term, df)) in document_frequency.into_iter().enumerate() {
            let df = df as f64;
            let value = if options.smooth_idf {
                ((1.0 + n) / (1.0 + df)).ln() + 1.0
            } else {
                (n / df).ln() + 1.0
            };
            vocabulary.insert(term, index);
            idf.push(value);
        }

        Ok(Self {
            options,
            vocabulary,
            idf,
        })
    }

    /// Fit and transform the training documents in one pass
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
        options: TfidfOptions,
    ) -> Result<(Self, Vec<SparseVector>)> {
        let vectorizer = Self::fit(documents, options)?;
        let rows = documents
            .iter()
            .map(|d| vectorizer.transform(d.as_ref()))
            .collect();
        Ok((vectorizer, rows))
    }

    /// Turn a document into an L2-normalized TF-IDF row
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in analyze(text, self.options.lowercase, self.options.stop_words) {
            if let Some(&index) = self.vocabulary.get(&token) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| {
                let tf = if self.options.sublinear_tf {
                    1.0 + count.ln()
                } else {
                    count
                };
                (index, tf * self.idf[index])
            })
            .collect();

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for (_, value) in entries.iter_mut() {
                *value /= norm;
            }
        }

        SparseVector::from_pairs(entries)
    }

    /// Check a deserialized vectorizer before use
    ///
    /// Every vocabulary index must address an idf weight and every weight
    /// must be finite.
    pub fn validate(&self) -> Result<()> {
        if self.idf.is_empty() {
            return Err(CoreError::EmptyVocabulary);
        }
        if let Some((term, index)) = self
            .vocabulary
            .iter()
            .find(|(_, index)| **index >= self.idf.len())
        {
            return Err(CoreError::InvalidModel(format!(
                "term '{}' has index {} but only {} idf weights exist",
                term,
                index,
                self.idf.len()
            )));
        }
        if let Some(index) = self.idf.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::InvalidModel(format!(
                "idf weight {} is not finite",
                index
            )));
        }
        Ok(())
    }

    pub fn n_features(&self) -> usize {
        self.idf.len()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    pub fn options(&self) -> &TfidfOptions {
        &self.options
    }
}
