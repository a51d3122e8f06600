//! Offline training and hold-out evaluation

use plaint_core::{Pipeline, PipelineOptions, TextClassifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::Result;
use crate::dataset::{Dataset, LabeledExample};
use crate::model::{ModelId, ModelMetadata};

/// A fitted pipeline together with its provenance
#[derive(Debug, Clone)]
pub struct TrainedModel {
    pub pipeline: Pipeline,
    pub metadata: ModelMetadata,
}

/// Fit a vectorizer and classifier on the whole dataset
pub fn train(dataset: &Dataset, options: &PipelineOptions) -> Result<TrainedModel> {
    tracing::info!(
        samples = dataset.len(),
        alpha = options.alpha,
        stop_words = options.tfidf.stop_words,
        "Training classifier"
    );

    let pipeline = Pipeline::fit(&dataset.texts(), &dataset.labels(), options)?;

    let metadata = ModelMetadata {
        id: ModelId::new(),
        trained_at: chrono::Utc::now().to_rfc3339(),
        dataset_hash: dataset.hash().to_string(),
        sample_count: dataset.len(),
        vocabulary_size: pipeline.vectorizer().n_features(),
        classes: pipeline.classes().to_vec(),
        class_counts: dataset.class_counts(),
        options: PipelineOptions {
            alpha: pipeline.classifier().alpha(),
            ..options.clone()
        },
    };

    tracing::info!(
        model_id = %metadata.id,
        classes = metadata.classes.len(),
        vocabulary = metadata.vocabulary_size,
        "Model trained"
    );

    Ok(TrainedModel { pipeline, metadata })
}

/// Precision, recall and F1 for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassReport {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    /// Number of held-out examples with this true label
    pub support: usize,
}

/// Hold-out evaluation results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub accuracy: f64,
    pub total: usize,
    pub correct: usize,
    pub per_class: BTreeMap<String, ClassReport>,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

/// Score a classifier against labeled examples
pub fn evaluate(
    classifier: &dyn TextClassifier,
    examples: &[LabeledExample],
) -> Result<EvaluationReport> {
    // (true positives, predicted count, actual count)
    let mut tallies: BTreeMap<String, (usize, usize, usize)> = BTreeMap::new();
    let mut correct = 0;

    for example in examples {
        let predicted = classifier.predict(&example.text)?.category;
        if predicted == example.category {
            correct += 1;
            tallies.entry(predicted.clone()).or_default().0 += 1;
        }
        tallies.entry(predicted).or_default().1 += 1;
        tallies.entry(example.category.clone()).or_default().2 += 1;
    }

    let per_class = tallies
        .into_iter()
        .map(|(category, (tp, predicted, actual))| {
            let precision = ratio(tp, predicted);
            let recall = ratio(tp, actual);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };
            (
                category,
                ClassReport {
                    precision,
                    recall,
                    f1,
                    support: actual,
                },
            )
        })
        .collect();

    Ok(EvaluationReport {
        accuracy: ratio(correct, examples.len()),
        total: examples.len(),
        correct,
        per_class,
    })
}
