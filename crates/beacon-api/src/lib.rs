//! JSON REST API for Beacon.
//!
//! Exposes an axum [`Router`] backed by any [`beacon_core::store::GeoStore`].
//! This layer owns input sanitisation; transport concerns such as TLS and
//! request timeouts are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", beacon_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod pins;
pub mod positions;
pub mod snapshot;
mod validate;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, post},
};
use beacon_core::store::GeoStore;
use serde::{Deserialize, Serialize};

pub use error::ApiError;

/// Body of every write that has nothing else to report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Success {
  pub success: bool,
}

impl Success {
  pub fn ok() -> Self { Self { success: true } }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: GeoStore + 'static,
{
  Router::new()
    // Presence
    .route("/positions", post(positions::update::<S>))
    .route("/positions/{subject_id}", delete(positions::remove::<S>))
    // Pins
    .route("/pins", post(pins::place::<S>))
    .route("/pins/nearest", get(pins::nearest::<S>))
    // Reads
    .route("/snapshot", get(snapshot::handler::<S>))
    .route("/health", get(snapshot::health::<S>))
    .with_state(store)
}

// ─── Router tests ─────────────────────────────────────────────────────────────
