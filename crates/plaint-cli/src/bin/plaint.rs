//! CLI for the Plaint complaint classifier

use clap::Parser;
use plaint_cli::{commands, error::CliError, load_config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plaint")]
#[command(about = "Train and query the Plaint complaint classifier", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(long, short = 'c', global = true, env = "PLAINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Train a classifier on a labeled CSV
    Train {
        /// Path to the training CSV (required)
        #[arg(long, short = 'd')]
        data: PathBuf,

        /// Output directory for the model artifacts
        #[arg(long, short = 'o', env = "PLAINT_MODEL_DIR")]
        output_dir: Option<String>,

        /// Column holding the complaint text
        #[arg(long)]
        text_column: Option<String>,

        /// Column holding the category
        #[arg(long)]
        label_column: Option<String>,

        /// Naive Bayes smoothing
        #[arg(long)]
        alpha: Option<f64>,

        /// Keep English stop words
        #[arg(long)]
        no_stop_words: bool,

        /// Keep original casing
        #[arg(long)]
        no_lowercase: bool,
    },
    /// Measure accuracy on a held-out split
    Evaluate {
        /// Path to the labeled CSV (required)
        #[arg(long, short = 'd')]
        data: PathBuf,

        /// Fraction of rows held out for testing
        #[arg(long, default_value = "0.2")]
        test_ratio: f64,

        /// Shuffle seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },
    /// Classify a complaint with a trained model
    Predict {
        /// Complaint text
        text: String,

        /// Model directory
        #[arg(long, short = 'm', env = "PLAINT_MODEL_DIR")]
        model_dir: Option<String>,

        /// Number of category scores to show
        #[arg(long, short = 'k')]
        top_k: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show information about a trained model
    Info {
        /// Model directory
        #[arg(long, short = 'm', env = "PLAINT_MODEL_DIR")]
        model_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Train {
            data,
            output_dir,
            text_column,
            label_column,
            alpha,
            no_stop_words,
            no_lowercase,
        }) => {
            let args = commands::TrainArgs {
                data,
                output_dir,
                text_column,
                label_column,
                alpha,
                no_stop_words,
                no_lowercase,
            };
            commands::run_train(args, config).await?;
        }
        Some(Commands::Evaluate {
            data,
            test_ratio,
            seed,
        }) => {
            commands::run_evaluate(&data, test_ratio, seed, config).await?;
        }
        Some(Commands::Predict {
            text,
            model_dir,
            top_k,
            json,
        }) => {
            commands::run_predict(&text, model_dir.as_deref(), top_k, json, config).await?;
        }
        Some(Commands::Info { model_dir }) => {
            commands::run_info(model_dir.as_deref(), config).await?;
        }
        None => {
            println!("Plaint complaint classifier");
            println!("Use --help for more information");
        }
    }

    Ok(())
}
