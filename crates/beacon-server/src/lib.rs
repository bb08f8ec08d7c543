//! HTTP server wiring for Beacon.
//!
//! Turns a [`ServerConfig`] into a store, a router and (optionally) a
//! background sweeper. `main.rs` only adds the CLI, tracing setup and the
//! listener.

use std::{sync::Arc, time::Duration};

use axum::Router;
use beacon_core::{settings::StoreSettings, store::GeoStore};
use chrono::TimeDelta;
use serde::Deserialize;
use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `BEACON_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                 String,
  pub port:                 u16,
  pub stale_threshold_secs: u32,
  pub pin_threshold_secs:   u32,
  pub exclusion_radius_m:   f64,
  /// Period of the background sweep. `0` disables it.
  pub sweep_interval_secs:  u64,
}

impl Default for ServerConfig {
  fn default() -> Self {
    let store = StoreSettings::default();
    Self {
      host:                 "127.0.0.1".to_string(),
      port:                 8080,
      stale_threshold_secs: whole_seconds(store.stale_threshold),
      pin_threshold_secs:   whole_seconds(store.pin_threshold),
      exclusion_radius_m:   store.exclusion_radius_m,
      sweep_interval_secs:  0,
    }
  }
}

fn whole_seconds(delta: TimeDelta) -> u32 {
  u32::try_from(delta.num_seconds()).unwrap_or(u32::MAX)
}

impl ServerConfig {
  pub fn store_settings(&self) -> StoreSettings {
    StoreSettings {
      stale_threshold:    TimeDelta::seconds(i64::from(self.stale_threshold_secs)),
      pin_threshold:      TimeDelta::seconds(i64::from(self.pin_threshold_secs)),
      exclusion_radius_m: self.exclusion_radius_m,
    }
  }

  pub fn sweep_interval(&self) -> Option<Duration> {
    (self.sweep_interval_secs > 0)
      .then(|| Duration::from_secs(self.sweep_interval_secs))
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The full application: the JSON API under `/api`, with request tracing.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: GeoStore + 'static,
{
  Router::new()
    .nest("/api", beacon_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Background sweep ─────────────────────────────────────────────────────────

/// Periodically evict expired entries so an idle store does not hold on to
/// them until the next read.
pub fn spawn_sweeper<S>(store: Arc<S>, every: Duration) -> JoinHandle<()>
where
  S: GeoStore + 'static,
{
  tokio::spawn(async move {
    let mut ticker = tokio::time::interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
      ticker.tick().await;
      let report = store.sweep();
      if !report.is_empty() {
        tracing::debug!(
          positions = report.positions_evicted,
          pins = report.pins_evicted,
          "background sweep"
        );
      }
    }
  })
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use beacon_core::{
    clock::ManualClock, position::PositionUpdate, settings::STALE_THRESHOLD,
  };
  use beacon_store_memory::MemoryStore;
  use chrono::{TimeZone, Utc};
  use tower::ServiceExt as _;

  fn parse(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_gives_production_settings() {
    let cfg = parse("");
    assert_eq!(cfg, ServerConfig::default());
    assert_eq!(cfg.store_settings(), StoreSettings::default());
    assert_eq!(cfg.sweep_interval(), None);
    assert_eq!(cfg.address(), "127.0.0.1:8080");
  }

  #[test]
  fn overrides_flow_into_store_settings() {
    let cfg = parse(
      r#"
        port = 9000
        stale_threshold_secs = 45
        pin_threshold_secs = 600
        exclusion_radius_m = 250.0
        sweep_interval_secs = 15
      "#,
    );
    let settings = cfg.store_settings();
    assert_eq!(settings.stale_threshold, TimeDelta::seconds(45));
    assert_eq!(settings.pin_threshold, TimeDelta::minutes(10));
    assert_eq!(settings.exclusion_radius_m, 250.0);
    assert_eq!(cfg.sweep_interval(), Some(Duration::from_secs(15)));
    assert_eq!(cfg.port, 9000);
  }

  #[tokio::test]
  async fn api_is_mounted_under_prefix() {
    let app = router(Arc::new(MemoryStore::new()));
    let resp = app
      .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
  }

  #[tokio::test]
  async fn sweeper_evicts_without_reads() {
    let clock = ManualClock::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap());
    let store = Arc::new(MemoryStore::with_clock(
      StoreSettings::default(),
      clock.clone(),
    ));
    store.update_position(PositionUpdate::new("u1", 0.0, 0.0));
    clock.advance(STALE_THRESHOLD + TimeDelta::seconds(1));

    let handle = spawn_sweeper(store.clone(), Duration::from_millis(5));
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.abort();

    // Nothing left for an explicit sweep to find.
    assert!(store.sweep().is_empty());
  }
}
