//! Read-only handlers: `GET /snapshot` and `GET /health`.

use std::sync::Arc;

use axum::{Json, extract::State};
use beacon_core::store::{GeoStore, Snapshot};
use serde::Serialize;

/// `GET /snapshot` — every live position and pin, read as one unit.
pub async fn handler<S>(State(store): State<Arc<S>>) -> Json<Snapshot>
where
  S: GeoStore,
{
  Json(store.read_snapshot())
}

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:    &'static str,
  pub positions: usize,
  pub pins:      usize,
}

/// `GET /health`
pub async fn health<S>(State(store): State<Arc<S>>) -> Json<Health>
where
  S: GeoStore,
{
  Json(Health {
    status:    "ok",
    positions: store.position_count(),
    pins:      store.pin_count(),
  })
}
