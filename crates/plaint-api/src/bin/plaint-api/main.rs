use clap::Parser;
use plaint::storage::LocalStorage;
use plaint::{ClassifierService, ModelStore, Triage};
use plaint_api::{ApiConfig, AppState, ConfigOverrides, build_app};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Plaint API Server
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Host address to bind to [default: 127.0.0.1]
    #[arg(short = 'H', long, env = "PLAINT_HOST")]
    host: Option<String>,

    /// Port to listen on [default: 8000]
    #[arg(short, long, env = "PLAINT_PORT")]
    port: Option<u16>,

    /// Log level (error, warn, info, debug, trace) [default: info]
    #[arg(short, long, env = "PLAINT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Config file path
    #[arg(short, long, env = "PLAINT_CONFIG")]
    config_file: Option<PathBuf>,

    /// Directory holding the trained model artifacts
    #[arg(short, long, env = "PLAINT_MODEL_DIR")]
    model_dir: Option<String>,

    /// Disable Swagger UI
    #[arg(long, env = "PLAINT_DISABLE_SWAGGER")]
    disable_swagger: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host.clone(),
            port: self.port,
            log_level: self.log_level.clone(),
            model_dir: self.model_dir.clone(),
            disable_swagger: self.disable_swagger,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let (mut config, load_error) = match &cli.config_file {
        Some(config_path) => match ApiConfig::load_from_file(config_path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (ApiConfig::default(), Some(e)),
        },
        None => (ApiConfig::default(), None),
    };

    // Override with CLI options
    config.apply_overrides(cli.overrides());

    // Initialize logging
    let filter = format!(
        "plaint_api={level},plaint={level},tower_http=debug",
        level = config.log_level
    );
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match (&cli.config_file, load_error) {
        (Some(_), Some(e)) => warn!(
            "Failed to load config file: {}. Using default configuration.",
            e
        ),
        (Some(config_path), None) => {
            info!("Configuration loaded from: {}", config_path.display())
        }
        _ => {}
    }

    let addr = config.socket_addr()?;

    // Load the model once; requests share it read-only
    let storage = Arc::new(LocalStorage::from_config(&config.classifier));
    let store = ModelStore::new(storage, config.classifier.model_dir.clone());
    let triage = Triage::new(&config.classifier.triage);
    let classifier = ClassifierService::load(&store, triage).await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to load model from '{}': {}. Run `plaint train` first.",
            store.dir(),
            e
        )
    })?;
    info!(
        "Model {} loaded with categories: {}",
        classifier.metadata().id,
        classifier.classes().join(", ")
    );

    let state = AppState::new(classifier, &config);

    // Build application
    let app = build_app(state);

    // Start server
    info!("Starting server on: {}", addr);
    if config.enable_swagger {
        info!("Swagger UI: http://{}/swagger-ui", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))
}
