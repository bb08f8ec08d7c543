//! Input sanitisation. The store trusts whatever it is handed, so everything
//! that reaches it from the network passes through here first.

use beacon_core::geo::Coordinates;

use crate::error::ApiError;

pub(crate) fn subject_id(id: &str) -> Result<(), ApiError> {
  if id.trim().is_empty() {
    return Err(ApiError::BadRequest("subject_id must not be empty".into()));
  }
  Ok(())
}

pub(crate) fn coordinates(
  latitude: f64,
  longitude: f64,
) -> Result<Coordinates, ApiError> {
  let c = Coordinates::new(latitude, longitude);
  if !c.is_valid() {
    return Err(ApiError::BadRequest(format!(
      "coordinates out of range: ({latitude}, {longitude})"
    )));
  }
  Ok(c)
}
