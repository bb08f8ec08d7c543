//! Alert pins: time-limited point annotations raised by a subject.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geo::Coordinates;

/// Namespace for name-based pin identifiers.
const PIN_NAMESPACE: Uuid = Uuid::from_u128(0x6b1f_3c9e_52a4_4d0b_9e57_0c2f_a8d1_7e43);

/// An alert raised at a point. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertPin {
  pub pin_id:         Uuid,
  /// Subject that raised the pin; the exclusion rule is scoped to it.
  pub raised_by:      String,
  /// Label captured at creation; later renames do not touch it.
  pub raised_by_name: String,
  pub coordinates:    Coordinates,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::GeoStore::place_pin`].
#[derive(Debug, Clone)]
pub struct NewPin {
  pub raised_by:      String,
  pub raised_by_name: Option<String>,
  pub coordinates:    Coordinates,
}

impl NewPin {
  pub fn new(raised_by: impl Into<String>, latitude: f64, longitude: f64) -> Self {
    Self {
      raised_by:      raised_by.into(),
      raised_by_name: None,
      coordinates:    Coordinates::new(latitude, longitude),
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.raised_by_name = Some(name.into());
    self
  }
}

/// A pin together with its great-circle distance from a query point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinDistance {
  pub pin:        AlertPin,
  pub distance_m: f64,
}

/// Derive a pin id from its creator and creation instant.
///
/// `attempt` disambiguates two pins from the same creator stamped with the
/// same instant; it is `0` in every other case.
pub fn derive_pin_id(raised_by: &str, created_at: DateTime<Utc>, attempt: u32) -> Uuid {
  let instant = created_at.to_rfc3339_opts(SecondsFormat::Nanos, true);
  let name = if attempt == 0 {
    format!("{raised_by}:{instant}")
  } else {
    format!("{raised_by}:{instant}:{attempt}")
  };
  Uuid::new_v5(&PIN_NAMESPACE, name.as_bytes())
}

#[cfg(test)]
mod tests {
  use chrono::{TimeDelta, TimeZone};

  use super::*;

  #[test]
  fn pin_id_is_deterministic() {
    let t = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    assert_eq!(derive_pin_id("u1", t, 0), derive_pin_id("u1", t, 0));
  }

  #[test]
  fn pin_id_varies_with_creator_instant_and_attempt() {
    let t = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let base = derive_pin_id("u1", t, 0);
    assert_ne!(base, derive_pin_id("u2", t, 0));
    assert_ne!(base, derive_pin_id("u1", t + TimeDelta::nanoseconds(1), 0));
    assert_ne!(base, derive_pin_id("u1", t, 1));
  }

  #[test]
  fn serialises_with_snake_case_fields() {
    let t = Utc.timestamp_opt(0, 0).unwrap();
    let pin = AlertPin {
      pin_id:         derive_pin_id("u1", t, 0),
      raised_by:      "u1".into(),
      raised_by_name: "Ana".into(),
      coordinates:    Coordinates::new(40.0, -73.0),
      created_at:     t,
    };
    let json = serde_json::to_value(&pin).unwrap();
    assert_eq!(json["raised_by_name"], "Ana");
    assert_eq!(json["coordinates"]["latitude"], 40.0);
    assert_eq!(json["created_at"], "1970-01-01T00:00:00Z");
  }
}
