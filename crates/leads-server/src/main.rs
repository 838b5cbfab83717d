//! leads server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store named by `store_path` if any, and serves the leads API over HTTP.
//!
//! ```text
//! LEADS_STORE_PATH=~/leads.db cargo run -p leads-server --bin server
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use leads_api::Gateway;
use leads_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::ServerConfig;

#[derive(Parser)]
#[command(author, version, about = "Lead capture API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let gateway = open_gateway(&server_cfg).await;

  let app = leads_api::api_router(gateway)
    .layer(TraceLayer::new_for_http())
    .layer(CorsLayer::permissive());
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Open the configured store. A missing setting or a store that fails to open
/// leaves the service running without one.
async fn open_gateway(cfg: &ServerConfig) -> Gateway<SqliteStore> {
  let Some(path) = cfg.store_path() else {
    tracing::warn!("no store_path configured; running without a store");
    return Gateway::Unconfigured;
  };

  match SqliteStore::open(&path).await {
    Ok(store) => {
      tracing::info!(path = %path.display(), "store opened");
      Gateway::Configured(Arc::new(store))
    }
    Err(e) => {
      tracing::error!(
        path = %path.display(),
        error = %e,
        "failed to open store; running without one"
      );
      Gateway::Unconfigured
    }
  }
}
