//! # Plaint Core Engine
//!
//! Text analysis, TF-IDF features and a multinomial Naive Bayes classifier.
//! Everything here is synchronous and free of I/O; persistence and serving
//! live in the `plaint` and `plaint-api` crates.

pub mod error;
pub mod naive_bayes;
pub mod pipeline;
pub mod text;
pub mod tfidf;

pub use error::{CoreError, Result};
pub use naive_bayes::{DEFAULT_ALPHA, MultinomialNb};
pub use pipeline::{ClassScore, Pipeline, PipelineOptions, Prediction, TextClassifier};
pub use text::{ENGLISH_STOP_WORDS, is_stop_word, tokenize};
pub use tfidf::{SparseVector, TfidfOptions, TfidfVectorizer};
