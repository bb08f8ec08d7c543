//! beacon server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), builds an
//! in-memory store and serves the JSON API over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use beacon_server::{ServerConfig, router, spawn_sweeper};
use beacon_store_memory::MemoryStore;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Beacon presence and alert-pin server")]
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

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("BEACON").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_settings = server_cfg.store_settings();
  tracing::info!(
    stale_threshold_secs = server_cfg.stale_threshold_secs,
    pin_threshold_secs = server_cfg.pin_threshold_secs,
    exclusion_radius_m = store_settings.exclusion_radius_m,
    "store configured"
  );
  let store = Arc::new(MemoryStore::with_clock(
    store_settings,
    beacon_core::clock::SystemClock,
  ));

  if let Some(every) = server_cfg.sweep_interval() {
    tracing::info!(?every, "background sweep enabled");
    spawn_sweeper(store.clone(), every);
  }

  let app = router(store);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!("failed to listen for ctrl-c: {e}");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
