//! Info command implementation

use crate::commands::model_store;
use crate::error::CliError;
use plaint::PlaintConfig;

/// Show provenance of a saved model
pub async fn run_info(model_dir: Option<&str>, config: PlaintConfig) -> Result<(), CliError> {
    let store = model_store(&config, model_dir);
    let metadata = store.load_metadata().await?;
    let sizes = store.artifact_sizes().await?;

    println!("📦 Model {}", metadata.id);
    println!("  Directory: {}", store.dir());
    println!("  Trained at: {}", metadata.trained_at);
    println!("  Dataset SHA-256: {}", metadata.dataset_hash);
    println!("  Samples: {}", metadata.sample_count);
    println!("  Vocabulary: {} terms", metadata.vocabulary_size);
    println!("  Alpha: {}", metadata.options.alpha);
    println!("  Stop words: {}", metadata.options.tfidf.stop_words);
    println!("\n  Categories:");
    for (category, count) in &metadata.class_counts {
        println!("    {:<20} {}", category, count);
    }
    println!("\n  Artifacts:");
    for (file, size) in sizes {
        println!("    {:<20} {} bytes", file, size);
    }

    Ok(())
}
