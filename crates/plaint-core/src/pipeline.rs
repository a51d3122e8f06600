//! Vectorizer + classifier pipeline
//!
//! [`Pipeline`] is the unit that gets trained, persisted and served. The
//! [`TextClassifier`] trait is the seam the service layer depends on, so the
//! HTTP and CLI front ends never touch feature rows directly.

use crate::naive_bayes::{DEFAULT_ALPHA, MultinomialNb};
use crate::tfidf::{TfidfOptions, TfidfVectorizer};
use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};

/// Options for fitting a pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Naive Bayes smoothing
    pub alpha: f64,
    pub tfidf: TfidfOptions,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            tfidf: TfidfOptions::default(),
        }
    }
}

/// Predicted label with its posterior probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub category: String,
    pub confidence: f64,
}

/// Probability of a single class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScore {
    pub category: String,
    pub probability: f64,
}

/// Anything that maps raw text to a category
pub trait TextClassifier: Send + Sync {
    /// Known categories in sorted order
    fn classes(&self) -> &[String];

    /// Most likely category
    fn predict(&self, text: &str) -> Result<Prediction>;

    /// All categories, most probable first
    fn predict_proba(&self, text: &str) -> Result<Vec<ClassScore>>;
}

/// Fitted TF-IDF vectorizer paired with a Naive Bayes model
#[derive(Debug, Clone)]
pub struct Pipeline {
    vectorizer: TfidfVectorizer,
    classifier: MultinomialNb,
}

impl Pipeline {
    /// Pair a vectorizer with a classifier, checking each is consistent and
    /// that they agree on feature width
    pub fn new(vectorizer: TfidfVectorizer, classifier: MultinomialNb) -> Result<Self> {
        vectorizer.validate()?;
        classifier.validate()?;
        if vectorizer.n_features() != classifier.n_features() {
            return Err(CoreError::ShapeMismatch {
                expected: vectorizer.n_features(),
                found: classifier.n_features(),
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Fit both stages on labeled documents
    pub fn fit<D: AsRef<str>, L: AsRef<str>>(
        documents: &[D],
        labels: &[L],
        options: &PipelineOptions,
    ) -> Result<Self> {
        if documents.len() != labels.len() {
            return Err(CoreError::LengthMismatch {
                documents: documents.len(),
                labels: labels.len(),
            });
        }

        let (vectorizer, rows) = TfidfVectorizer::fit_transform(documents, options.tfidf.clone())?;
        let classifier =
            MultinomialNb::fit(&rows, labels, vectorizer.n_features(), options.alpha)?;

        Self::new(vectorizer, classifier)
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &MultinomialNb {
        &self.classifier
    }
}

impl TextClassifier for Pipeline {
    fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    fn predict(&self, text: &str) -> Result<Prediction> {
        let row = self.vectorizer.transform(text);
        let index = self.classifier.predict_index(&row)?;
        let proba = self.classifier.predict_proba(&row)?;
        Ok(Prediction {
            category: self.classifier.classes()[index].clone(),
            confidence: proba[index],
        })
    }

    fn predict_proba(&self, text: &str) -> Result<Vec<ClassScore>> {
        let row = self.vectorizer.transform(text);
        let proba = self.classifier.predict_proba(&row)?;

        let mut scores: Vec<ClassScore> = self
            .classifier
            .classes()
            .iter()
            .zip(proba)
            .map(|(category, probability)| ClassScore {
                category: category.clone(),
                probability,
            })
            .collect();
        // Stable sort keeps class order among equal probabilities
        scores.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training_set() -> (Vec<&'static str>, Vec<&'static str>) {
        (
            vec![
                "water pipe burst near the school",
                "no water supply since morning",
                "sewage water leaking on road",
                "power outage in the whole block",
                "street light not working",
                "transformer sparks and power cut",
                "garbage not collected for days",
                "trash dump smells terrible",
            ],
            vec![
                "Water",
                "Water",
                "Water",
                "Electricity",
                "Electricity",
                "Electricity",
                "Sanitation",
                "Sanitation",
            ],
        )
    }

    #[test]
    fn test_fit_and_predict() {
        let (docs, labels) = training_set();
        let pipeline = Pipeline::fit(&docs, &labels, &PipelineOptions::default()).unwrap();

        assert_eq!(pipeline.classes(), &["Electricity", "Sanitation", "Water"]);
        assert_eq!(pipeline.predict("the water pipe is broken").unwrap().category, "Water");
        assert_eq!(pipeline.predict("power cut again").unwrap().category, "Electricity");
        assert_eq!(pipeline.predict("garbage and trash everywhere").unwrap().category, "Sanitation");
    }

    #[test]
    fn test_unknown_text_falls_back_to_prior() {
        let (docs, labels) = training_set();
        let pipeline = Pipeline::fit(&docs, &labels, &PipelineOptions::default()).unwrap();
        // Electricity and Water tie on prior; sorted order breaks the tie
        assert_eq!(pipeline.predict("").unwrap().category, "Electricity");
    }

    #[test]
    fn test_predict_proba_is_sorted() {
        let (docs, labels) = training_set();
        let pipeline = Pipeline::fit(&docs, &labels, &PipelineOptions::default()).unwrap();
        let scores = pipeline.predict_proba("water leaking").unwrap();

        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].category, "Water");
        assert!(scores.windows(2).all(|w| w[0].probability >= w[1].probability));

        let prediction = pipeline.predict("water leaking").unwrap();
        assert!((prediction.confidence - scores[0].probability).abs() < 1e-12);
    }

    #[test]
    fn test_mismatched_artifacts_rejected() {
        let (docs, labels) = training_set();
        let pipeline = Pipeline::fit(&docs, &labels, &PipelineOptions::default()).unwrap();
        let other = Pipeline::fit(&["power cut"], &["Electricity"], &PipelineOptions::default())
            .unwrap();

        let result = Pipeline::new(
            pipeline.vectorizer().clone(),
            other.classifier().clone(),
        );
        assert!(matches!(result, Err(CoreError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_inconsistent_vectorizer_rejected() {
        let (docs, labels) = training_set();
        let pipeline = Pipeline::fit(&docs, &labels, &PipelineOptions::default()).unwrap();

        let mut json = serde_json::to_value(pipeline.vectorizer()).unwrap();
        json["vocabulary"]["water"] = serde_json::json!(999);
        let vectorizer: TfidfVectorizer = serde_json::from_value(json).unwrap();

        let result = Pipeline::new(vectorizer, pipeline.classifier().clone());
        assert!(matches!(result, Err(CoreError::InvalidModel(_))));
    }

    #[test]
    fn test_label_count_must_match() {
        let result = Pipeline::fit(&["a pipe"], &["Water", "Water"], &PipelineOptions::default());
        assert!(matches!(result, Err(CoreError::LengthMismatch { .. })));
    }
}
