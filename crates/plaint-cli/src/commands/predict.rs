//! Predict command implementation

use crate::commands::model_store;
use crate::error::CliError;
use plaint::{ClassifierService, PlaintConfig, Triage};

/// Classify one complaint with a saved model
pub async fn run_predict(
    text: &str,
    model_dir: Option<&str>,
    top_k: Option<usize>,
    json: bool,
    config: PlaintConfig,
) -> Result<(), CliError> {
    if top_k == Some(0) {
        return Err(CliError::InvalidInput(
            "--top-k must be at least 1".to_string(),
        ));
    }

    let store = model_store(&config, model_dir);
    let service = ClassifierService::load(&store, Triage::new(&config.triage)).await?;
    let classification = service.classify(text, top_k)?;

    if json {
        let output = serde_json::to_string_pretty(&classification)
            .map_err(|e| CliError::InvalidInput(format!("Failed to encode result: {}", e)))?;
        println!("{}", output);
        return Ok(());
    }

    println!("🏷️  Category: {}", classification.category);
    println!("   Confidence: {:.3}", classification.confidence);
    println!("🏢 Department: {}", classification.department);
    match classification.urgency {
        Some(urgency) => println!("🚨 Urgency: {}", urgency),
        None => println!("🚨 Urgency: not detected"),
    }
    if classification.scores.len() > 1 {
        println!("\nScores:");
        for score in &classification.scores {
            println!("  {:<20} {:.3}", score.category, score.probability);
        }
    }

    Ok(())
}
