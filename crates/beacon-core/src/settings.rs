//! Expiry and admission parameters.

use chrono::TimeDelta;

/// A position older than this is no longer reported.
pub const STALE_THRESHOLD: TimeDelta = TimeDelta::seconds(30);

/// A pin older than this is no longer reported.
pub const PIN_THRESHOLD: TimeDelta = TimeDelta::minutes(20);

/// Minimum distance between two pins raised by the same subject.
pub const EXCLUSION_RADIUS_M: f64 = 100.0;

/// Tunables for a store instance. [`Default`] gives the production values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoreSettings {
  /// Records whose age is strictly greater than this are evicted.
  pub stale_threshold:    TimeDelta,
  /// Pins whose age is strictly greater than this are evicted.
  pub pin_threshold:      TimeDelta,
  /// Placement is refused when an own pin is strictly closer than this.
  pub exclusion_radius_m: f64,
}

impl Default for StoreSettings {
  fn default() -> Self {
    Self {
      stale_threshold:    STALE_THRESHOLD,
      pin_threshold:      PIN_THRESHOLD,
      exclusion_radius_m: EXCLUSION_RADIUS_M,
    }
  }
}
