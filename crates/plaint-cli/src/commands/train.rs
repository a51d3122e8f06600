//! Train command implementation

use crate::commands::{model_store, read_dataset};
use crate::error::CliError;
use plaint::{PlaintConfig, train};
use std::path::PathBuf;

/// Training parameters; unset fields fall back to the config file
#[derive(Debug, Clone, Default)]
pub struct TrainArgs {
    pub data: PathBuf,
    pub output_dir: Option<String>,
    pub text_column: Option<String>,
    pub label_column: Option<String>,
    pub alpha: Option<f64>,
    pub no_stop_words: bool,
    pub no_lowercase: bool,
}

impl TrainArgs {
    /// Fold command line overrides into the config
    pub fn apply(&self, config: &mut PlaintConfig) {
        if let Some(column) = &self.text_column {
            config.dataset.text_column = column.clone();
        }
        if let Some(column) = &self.label_column {
            config.dataset.label_column = column.clone();
        }
        if let Some(alpha) = self.alpha {
            config.training.alpha = alpha;
        }
        if self.no_stop_words {
            config.training.tfidf.stop_words = false;
        }
        if self.no_lowercase {
            config.training.tfidf.lowercase = false;
        }
    }
}

/// Fit the vectorizer and classifier on a CSV and save both
pub async fn run_train(args: TrainArgs, mut config: PlaintConfig) -> Result<(), CliError> {
    args.apply(&mut config);

    println!("🎯 Training complaint classifier...\n");

    let dataset = read_dataset(&args.data, &config).await?;

    println!("📝 Training configuration:");
    println!("  Data: {}", args.data.display());
    println!("  Rows: {}", dataset.len());
    println!(
        "  Columns: text='{}', label='{}'",
        config.dataset.text_column, config.dataset.label_column
    );
    println!("  Alpha: {}", config.training.alpha);
    println!("  Stop words: {}", config.training.tfidf.stop_words);
    println!("  Lowercase: {}\n", config.training.tfidf.lowercase);

    let model = train(&dataset, &config.training)?;

    let store = model_store(&config, args.output_dir.as_deref());
    store.save(&model).await?;

    println!("Model trained");
    println!("  ID: {}", model.metadata.id);
    println!("  Categories: {}", model.metadata.classes.join(", "));
    println!("  Vocabulary: {} terms", model.metadata.vocabulary_size);
    println!("📁 Model saved to: {}", store.dir());

    Ok(())
}
