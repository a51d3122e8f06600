//! Evaluate command implementation

use crate::commands::read_dataset;
use crate::error::CliError;
use plaint::{PlaintConfig, evaluate, train};
use std::path::Path;

/// Train on a shuffled split and report accuracy on the held-out part
pub async fn run_evaluate(
    data: &Path,
    test_ratio: f64,
    seed: u64,
    config: PlaintConfig,
) -> Result<(), CliError> {
    println!("🧪 Evaluating on a {:.0}% hold-out split...\n", test_ratio * 100.0);

    let dataset = read_dataset(data, &config).await?;
    let (train_set, test_set) = dataset.split(test_ratio, seed)?;

    let model = train(&train_set, &config.training)?;
    let report = evaluate(&model.pipeline, test_set.examples())?;

    println!(
        "  Train: {} rows, Test: {} rows (seed {})\n",
        train_set.len(),
        test_set.len(),
        seed
    );
    println!(
        "{:<20} {:>9} {:>9} {:>9} {:>9}",
        "category", "precision", "recall", "f1", "support"
    );
    for (category, class) in &report.per_class {
        println!(
            "{:<20} {:>9.3} {:>9.3} {:>9.3} {:>9}",
            category, class.precision, class.recall, class.f1, class.support
        );
    }
    println!(
        "\n✅ Accuracy: {:.3} ({}/{})",
        report.accuracy, report.correct, report.total
    );

    Ok(())
}
