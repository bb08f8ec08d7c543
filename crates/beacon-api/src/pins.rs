//! Handlers for `/pins` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/pins` | Body: [`PinBody`]; 201 on success, 409 when too close |
//! | `GET`  | `/pins/nearest` | `?latitude&longitude`; 404 when no pins are live |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use beacon_core::{
  pin::{AlertPin, NewPin, PinDistance},
  store::GeoStore,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, validate};

// ─── Place ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PinBody {
  pub subject_id:   String,
  pub display_name: Option<String>,
  pub latitude:     f64,
  pub longitude:    f64,
}

#[derive(Debug, Serialize)]
pub struct Placed {
  pub success: bool,
  pub pin:     AlertPin,
}

/// `POST /pins`
pub async fn place<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PinBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: GeoStore,
{
  validate::subject_id(&body.subject_id)?;
  let coordinates = validate::coordinates(body.latitude, body.longitude)?;

  let pin = store.place_pin(NewPin {
    raised_by: body.subject_id,
    raised_by_name: body.display_name,
    coordinates,
  })?;
  Ok((StatusCode::CREATED, Json(Placed { success: true, pin })))
}

// ─── Nearest ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct NearestParams {
  pub latitude:  f64,
  pub longitude: f64,
}

/// `GET /pins/nearest?latitude=..&longitude=..`
pub async fn nearest<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<NearestParams>,
) -> Result<Json<PinDistance>, ApiError>
where
  S: GeoStore,
{
  let at = validate::coordinates(params.latitude, params.longitude)?;
  store
    .nearest_pin(at)
    .map(Json)
    .ok_or_else(|| ApiError::NotFound("no live pins".into()))
}
