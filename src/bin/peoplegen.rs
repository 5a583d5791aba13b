//! peoplegen CLI: generate fictional people into a JSON file, batch after batch.
//!
//! Usage:
//!   peoplegen [--count 10] [--out people.json] [--batches N]
//!
//! Runs until a batch fails, or forever when `--batches` is not given.

use clap::Parser;
use peoplegen::config::{self, Config};
use peoplegen::BatchPipeline;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "peoplegen",
    version,
    about = "Generate schema-clean fictional people with a hosted text model"
)]
struct Cli {
    /// People requested per batch
    #[arg(long, default_value_t = config::DEFAULT_BATCH_SIZE)]
    count: usize,
    /// JSON file the batches accumulate in
    #[arg(long, default_value = config::DEFAULT_STORE_PATH)]
    out: PathBuf,
    /// Stop after this many batches
    #[arg(long)]
    batches: Option<u64>,
    /// Model identifier
    #[arg(long, env = "OPENAI_MODEL", default_value = config::DEFAULT_MODEL)]
    model: String,
    /// API credential
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,
    /// API base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = config::DEFAULT_BASE_URL)]
    base_url: String,
}

impl Cli {
    fn into_config(self) -> (Config, Option<u64>) {
        let mut config = Config::default()
            .with_model(self.model)
            .with_base_url(self.base_url)
            .with_store_path(self.out)
            .with_batch_size(self.count);
        if let Some(key) = self.api_key {
            config = config.with_api_key(key);
        }
        (config, self.batches)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    let (config, batches) = Cli::parse().into_config();
    tracing::debug!(?config, "starting");

    let pipeline = match BatchPipeline::from_config(&config) {
        Ok(p) => p,
        Err(e) => {
            tracing::error!(error = %e, "failed to build generation client");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    tracing::info!(
        store = %pipeline.store().path().display(),
        model = %config.model,
        count = config.batch_size,
        "generating"
    );

    let mut completed = 0u64;
    while batches.map_or(true, |limit| completed < limit) {
        match pipeline.run_batch(config.batch_size).await {
            Ok(report) => {
                println!("Wrote {} people to {}", report.total, report.path.display());
            }
            Err(e) => {
                tracing::error!(error = %e, batch = completed + 1, "batch failed");
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        completed += 1;
    }
}
