//! Great-circle geometry on a spherical Earth.
//!
//! Both pin admission and the nearest-pin query go through [`haversine_m`],
//! so the two always agree on what "100 meters" means.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used by the spherical approximation.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A (latitude, longitude) pair in decimal degrees.
///
/// Range checking is the transport layer's job; the store accepts whatever it
/// is given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Coordinates {
  pub fn new(latitude: f64, longitude: f64) -> Self {
    Self { latitude, longitude }
  }

  /// `true` when both components are finite and inside [-90, 90] and
  /// [-180, 180] respectively.
  pub fn is_valid(&self) -> bool {
    self.latitude.is_finite()
      && self.longitude.is_finite()
      && (-90.0..=90.0).contains(&self.latitude)
      && (-180.0..=180.0).contains(&self.longitude)
  }

  /// The point `meters` due north of `self` along the meridian.
  ///
  /// Along a meridian the haversine distance reduces to `R * Δφ`, which makes
  /// this handy for building points at a known distance.
  pub fn offset_north(&self, meters: f64) -> Self {
    Self {
      latitude:  self.latitude + (meters / EARTH_RADIUS_M).to_degrees(),
      longitude: self.longitude,
    }
  }
}

/// Haversine distance in meters between two points.
pub fn haversine_m(a: Coordinates, b: Coordinates) -> f64 {
  let phi_a = a.latitude.to_radians();
  let phi_b = b.latitude.to_radians();
  let d_phi = (b.latitude - a.latitude).to_radians();
  let d_lambda = (b.longitude - a.longitude).to_radians();

  let h = (d_phi / 2.0).sin().powi(2)
    + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
  let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

  EARTH_RADIUS_M * c
}
