use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use fnd_inference::invoke::InvokeMode;
use fnd_inference::{Config, ModelCache};
use fnd_web::{AppState, WebConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Web form that checks a news article with two trained classifiers", long_about = None)]
pub struct Cli {
    /// Directory holding the model artifacts
    #[arg(long, default_value = "model")]
    model_dir: PathBuf,
    /// Decision tree artifact, relative to the model directory
    #[arg(long, default_value = "decision_tree_model.onnx")]
    decision_tree: String,
    /// SVM artifact, relative to the model directory
    #[arg(long, default_value = "svm_model.onnx")]
    svm: String,
    /// Intra-op threads per ONNX Runtime session
    #[arg(long, default_value_t = 1)]
    onnx_threads: usize,
    #[arg(long, default_value = "127.0.0.1:8501")]
    bind: SocketAddr,
    /// Also show each model's confidence score
    #[arg(long)]
    confidence: bool,
}

impl Cli {
    fn inference_config(&self) -> Config {
        Config {
            model_dir: self.model_dir.clone(),
            decision_tree_file: self.decision_tree.clone(),
            svm_file: self.svm.clone(),
            onnx_threads: 1,
        }
        .with_threads(self.onnx_threads)
    }

    fn invoke_mode(&self) -> InvokeMode {
        if self.confidence {
            InvokeMode::WithConfidence
        } else {
            InvokeMode::LabelOnly
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = cli.inference_config();
    let mode = cli.invoke_mode();
    let models = Arc::new(ModelCache::new(config));

    let registry = models.get();
    match registry.loaded_count() {
        0 => warn!("⚠️ No model could be loaded, every panel will show as unavailable"),
        n => info!("🧠 {} of {} models ready", n, registry.slots().len()),
    }
    if mode == InvokeMode::WithConfidence {
        info!("Confidence scores enabled");
    }

    let state = AppState::new(models, mode);
    fnd_web::serve(WebConfig { bind: cli.bind }, state).await?;
    Ok(())
}
