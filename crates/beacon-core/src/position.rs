//! Position records, the unit of the presence registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// Number of leading `subject_id` characters used in the fallback label.
const DEFAULT_NAME_PREFIX_LEN: usize = 6;

/// Where a subject was last seen. Replaced wholesale on every update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
  pub subject_id:   String,
  pub display_name: String,
  pub coordinates:  Coordinates,
  /// Server-assigned; set to "now" on every write.
  pub last_updated: DateTime<Utc>,
}

/// Input to [`crate::store::GeoStore::update_position`].
/// `last_updated` is always set by the store; it is not accepted from callers.
#[derive(Debug, Clone)]
pub struct PositionUpdate {
  pub subject_id:   String,
  pub coordinates:  Coordinates,
  pub display_name: Option<String>,
}

impl PositionUpdate {
  pub fn new(subject_id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
    Self {
      subject_id:   subject_id.into(),
      coordinates:  Coordinates::new(latitude, longitude),
      display_name: None,
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.display_name = Some(name.into());
    self
  }
}

/// The label shown for a subject that never supplied one: `"User "` followed
/// by the first six characters of its id.
pub fn default_display_name(subject_id: &str) -> String {
  let short: String = subject_id.chars().take(DEFAULT_NAME_PREFIX_LEN).collect();
  format!("User {short}")
}

/// `name` if it has any non-whitespace content, otherwise the fallback label.
pub fn resolve_display_name(subject_id: &str, name: Option<&str>) -> String {
  match name.map(str::trim) {
    Some(n) if !n.is_empty() => n.to_owned(),
    _ => default_display_name(subject_id),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn fallback_uses_short_id() {
    assert_eq!(default_display_name("a1b2c3d4e5"), "User a1b2c3");
    assert_eq!(default_display_name("u1"), "User u1");
  }

  #[test]
  fn fallback_counts_characters_not_bytes() {
    assert_eq!(default_display_name("éééééééé"), "User éééééé");
  }

  #[test]
  fn blank_names_fall_back() {
    assert_eq!(resolve_display_name("u1", None), "User u1");
    assert_eq!(resolve_display_name("u1", Some("")), "User u1");
    assert_eq!(resolve_display_name("u1", Some("   ")), "User u1");
    assert_eq!(resolve_display_name("u1", Some(" Ana ")), "Ana");
  }
}
