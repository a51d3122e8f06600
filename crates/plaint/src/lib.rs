//! Main crate for Plaint
//!
//! Ties the core engine to the outside world: CSV datasets, on-disk model
//! artifacts, keyword triage and the classifier service shared by the API
//! server and the CLI.

pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod storage;
pub mod training;
pub mod triage;

// Re-export core types
pub use plaint_core::{
    ClassScore, CoreError, Pipeline, PipelineOptions, Prediction, TextClassifier, TfidfOptions,
};

pub use config::PlaintConfig;
pub use dataset::{Dataset, DatasetError, LabeledExample};
pub use error::{PlaintError, Result};
pub use model::{Classification, ClassifierService, ModelError, ModelMetadata, ModelStore};
pub use training::{EvaluationReport, TrainedModel, evaluate, train};
pub use triage::{Triage, TriageConfig, Urgency};
