//! HTTP server for authoring and driving dialogue trees.
//!
//! Usage: `server [--data-dir DIR] [--port PORT]`
//!
//! The completion capability is configured from the environment:
//! `OPENAI_API_KEY` (required), `OPENAI_BASE_URL`, `OPENAI_MODEL`.
//!
//! Set `RUST_LOG=dialogue_tree=trace` for per-step traversal events.

use std::process;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dialogue_tree::http::{AppState, router};
use dialogue_tree::{CompletionConfig, OpenAiClient, TreeStore};

/// Serve the dialogue-tree REST API.
#[derive(Parser, Debug)]
#[command(name = "server")]
struct Args {
  /// Directory holding one JSON file per dialogue tree.
  #[arg(long, env = "DIALOGUE_DATA_DIR", default_value = "data")]
  data_dir: std::path::PathBuf,

  /// Port to bind on.
  #[arg(long, env = "PORT", default_value_t = 8000)]
  port: u16,

  /// API key for the completion service.
  #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
  api_key: String,

  /// Base URL of an OpenAI-compatible completions API.
  #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com")]
  base_url: String,

  /// Completion model name.
  #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo-instruct")]
  model: String,
}

#[tokio::main]
async fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();

  let args = Args::parse();

  let config = CompletionConfig::new(args.api_key)
    .with_base_url(args.base_url)
    .with_model(args.model.clone());
  let model = match OpenAiClient::new(config) {
    Ok(client) => client,
    Err(e) => {
      eprintln!("Error building completion client: {}", e);
      process::exit(1);
    }
  };

  let store = TreeStore::new(args.data_dir.clone());
  let state = AppState::new(store, Arc::new(model));
  let app = router(state);

  let addr = format!("0.0.0.0:{}", args.port);
  let listener = match tokio::net::TcpListener::bind(&addr).await {
    Ok(l) => l,
    Err(e) => {
      eprintln!("Error binding {}: {}", addr, e);
      process::exit(1);
    }
  };

  info!(addr = %addr, data_dir = %args.data_dir.display(), model = %args.model, "server listening");
  if let Err(e) = axum::serve(listener, app).await {
    eprintln!("Server error: {}", e);
    process::exit(1);
  }
}
