//! Handlers for `/positions` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/positions` | Body: [`PositionBody`] |
//! | `DELETE` | `/positions/{subject_id}` | Idempotent |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use beacon_core::{position::PositionUpdate, store::GeoStore};
use serde::Deserialize;

use crate::{Success, error::ApiError, validate};

#[derive(Debug, Deserialize)]
pub struct PositionBody {
  pub subject_id:   String,
  pub latitude:     f64,
  pub longitude:    f64,
  pub display_name: Option<String>,
}

/// `POST /positions`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<PositionBody>,
) -> Result<Json<Success>, ApiError>
where
  S: GeoStore,
{
  validate::subject_id(&body.subject_id)?;
  let coordinates = validate::coordinates(body.latitude, body.longitude)?;

  store.update_position(PositionUpdate {
    subject_id: body.subject_id,
    coordinates,
    display_name: body.display_name,
  });
  Ok(Json(Success::ok()))
}

/// `DELETE /positions/{subject_id}`
pub async fn remove<S>(
  State(store): State<Arc<S>>,
  Path(subject_id): Path<String>,
) -> Json<Success>
where
  S: GeoStore,
{
  store.remove_position(&subject_id);
  Json(Success::ok())
}
