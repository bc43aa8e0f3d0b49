use anyhow::Context;
use clap::Parser;
use medknn_api::RestApi;
use medknn_core::DEFAULT_K;
use medknn_storage::{DatasetConfig, ModelManager, ModelStore, DEFAULT_LABEL_COLUMN, DEFAULT_SAMPLE_CAP};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Symptom-to-condition classifier server
#[derive(Parser, Debug)]
#[command(name = "medknn")]
#[command(about = "Exact k-NN symptom classifier", long_about = None)]
struct Args {
    /// Directory holding the saved model artifacts
    #[arg(long, default_value = "./model")]
    model_dir: PathBuf,

    /// CSV training dataset, used when no saved model is available
    #[arg(long, default_value = "./Final_Augmented_dataset_Diseases_and_Symptoms.csv")]
    dataset: PathBuf,

    /// Name of the label column in the dataset
    #[arg(long, default_value = DEFAULT_LABEL_COLUMN)]
    label_column: String,

    /// Number of neighbors consulted per prediction
    #[arg(short = 'k', long = "k", default_value_t = DEFAULT_K)]
    k: usize,

    /// Maximum number of training rows; larger datasets are sampled
    #[arg(long, default_value_t = DEFAULT_SAMPLE_CAP)]
    sample_cap: usize,

    /// Seed for row sampling
    #[arg(long)]
    seed: Option<u64>,

    /// HTTP API port
    #[arg(long, default_value_t = 5000)]
    http_port: u16,

    /// Train from the dataset even if a saved model exists
    #[arg(long)]
    retrain: bool,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting medknn v{}", env!("CARGO_PKG_VERSION"));
    info!("Model directory: {:?}", args.model_dir);
    info!("Dataset: {:?}", args.dataset);

    let dataset = DatasetConfig {
        label_column: args.label_column.clone(),
        sample_cap: args.sample_cap,
        seed: args.seed,
    };
    let manager = ModelManager::new(ModelStore::new(&args.model_dir), &args.dataset, dataset, args.k)?;

    if args.retrain {
        manager.retrain().context("failed to train model")?;
    } else {
        manager
            .load_or_train()
            .context("no usable model: saved artifacts missing or corrupt, and training failed")?;
    }

    let handle = manager.handle();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || -> std::io::Result<()> {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(RestApi::start(handle, http_port))
    });

    info!("HTTP API: http://localhost:{}/", http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        joined = tokio::task::spawn_blocking(move || http_handle.join()) => {
            match joined {
                Ok(Ok(Ok(()))) => info!("HTTP server stopped"),
                Ok(Ok(Err(e))) => {
                    tracing::error!("HTTP server error: {}", e);
                    return Err(e).context(format!("HTTP server on port {} failed", http_port));
                }
                Ok(Err(_)) | Err(_) => anyhow::bail!("HTTP server thread panicked"),
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}
