//! Multinomial Naive Bayes over sparse feature rows

use crate::tfidf::SparseVector;
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Additive (Laplace) smoothing used when none is configured
pub const DEFAULT_ALPHA: f64 = 1.0;

/// Smallest smoothing value; smaller values are clamped to keep log probabilities finite
const MIN_ALPHA: f64 = 1e-10;

/// Fitted multinomial Naive Bayes classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultinomialNb {
    alpha: f64,
    /// Sorted class labels
    classes: Vec<String>,
    class_count: Vec<f64>,
    class_log_prior: Vec<f64>,
    /// One row per class, one column per feature
    feature_log_prob: Vec<Vec<f64>>,
}

impl MultinomialNb {
    /// Fit on `rows` of width `n_features` with one label per row
    pub fn fit<S: AsRef<str>>(
        rows: &[SparseVector],
        labels: &[S],
        n_features: usize,
        alpha: f64,
    ) -> Result<Self> {
        if rows.len() != labels.len() {
            return Err(CoreError::LengthMismatch {
                documents: rows.len(),
                labels: labels.len(),
            });
        }
        if rows.is_empty() {
            return Err(CoreError::EmptyDataset);
        }
        if !alpha.is_finite() || alpha < 0.0 {
            return Err(CoreError::InvalidParameter(format!(
                "alpha must be a non-negative number, got {}",
                alpha
            )));
        }
        let alpha = alpha.max(MIN_ALPHA);

        let class_index: BTreeMap<&str, usize> = labels
            .iter()
            .map(|l| l.as_ref())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .enumerate()
            .map(|(i, label)| (label, i))
            .collect();
        let classes: Vec<String> = class_index.keys().map(|s| s.to_string()).collect();

        let mut class_count = vec![0.0; classes.len()];
        let mut feature_count = vec![vec![0.0; n_features]; classes.len()];

        for (row, label) in rows.iter().zip(labels) {
            if row.min_width() > n_features {
                return Err(CoreError::ShapeMismatch {
                    expected: n_features,
                    found: row.min_width(),
                });
            }
            let c = class_index[label.as_ref()];
            class_count[c] += 1.0;
            for (index, value) in row.entries() {
                feature_count[c][*index] += value;
            }
        }

        let total: f64 = class_count.iter().sum();
        let class_log_prior = class_count.iter().map(|n| (n / total).ln()).collect();

        let feature_log_prob = feature_count
            .into_iter()
            .map(|counts| {
                let smoothed_total: f64 = counts.iter().map(|c| c + alpha).sum();
                let log_total = smoothed_total.ln();
                counts
                    .into_iter()
                    .map(|c| (c + alpha).ln() - log_total)
                    .collect()
            })
            .collect();

        Ok(Self {
            alpha,
            classes,
            class_count,
            class_log_prior,
            feature_log_prob,
        })
    }

    /// Unnormalized log posterior for every class
    pub fn joint_log_likelihood(&self, row: &SparseVector) -> Result<Vec<f64>> {
        let width = self.n_features();
        if row.min_width() > width {
            return Err(CoreError::ShapeMismatch {
                expected: width,
                found: row.min_width(),
            });
        }

        Ok(self
            .feature_log_prob
            .iter()
            .zip(&self.class_log_prior)
            .map(|(log_prob, prior)| row.dot(log_prob) + prior)
            .collect())
    }

    /// Index of the most likely class; ties resolve to the earliest class
    pub fn predict_index(&self, row: &SparseVector) -> Result<usize> {
        let jll = self.joint_log_likelihood(row)?;
        let mut best = 0;
        for (i, value) in jll.iter().enumerate().skip(1) {
            if *value > jll[best] {
                best = i;
            }
        }
        Ok(best)
    }

    /// Most likely class label
    pub fn predict(&self, row: &SparseVector) -> Result<&str> {
        let index = self.predict_index(row)?;
        Ok(&self.classes[index])
    }

    /// Class probabilities in class order
    pub fn predict_proba(&self, row: &SparseVector) -> Result<Vec<f64>> {
        let jll = self.joint_log_likelihood(row)?;
        let max = jll.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let log_sum = max + jll.iter().map(|v| (v - max).exp()).sum::<f64>().ln();
        Ok(jll.iter().map(|v| (v - log_sum).exp()).collect())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn class_count(&self) -> &[f64] {
        &self.class_count
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn n_features(&self) -> usize {
        self.feature_log_prob.first().map(Vec::len).unwrap_or(0)
    }

    /// Check a deserialized classifier before use
    pub fn validate(&self) -> Result<()> {
        let n_classes = self.classes.len();
        if n_classes == 0 {
            return Err(CoreError::InvalidModel("no classes".to_string()));
        }
        for (name, len) in [
            ("class_count", self.class_count.len()),
            ("class_log_prior", self.class_log_prior.len()),
            ("feature_log_prob", self.feature_log_prob.len()),
        ] {
            if len != n_classes {
                return Err(CoreError::InvalidModel(format!(
                    "{} has {} entries for {} classes",
                    name, len, n_classes
                )));
            }
        }

        let width = self.n_features();
        if let Some(c) = self.feature_log_prob.iter().position(|r| r.len() != width) {
            return Err(CoreError::InvalidModel(format!(
                "feature_log_prob row {} has {} columns, expected {}",
                c,
                self.feature_log_prob[c].len(),
                width
            )));
        }

        let finite = self
            .class_log_prior
            .iter()
            .chain(self.feature_log_prob.iter().flatten())
            .all(|v| v.is_finite());
        if !finite {
            return Err(CoreError::InvalidModel(
                "log probabilities must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
