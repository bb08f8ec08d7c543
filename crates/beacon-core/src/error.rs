//! Error types for `beacon-core`.

use thiserror::Error;

/// Why a pin placement was refused.
///
/// This is the only failure the store can produce. Every other operation is
/// total over its input domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AdmissionError {
  /// A live pin raised by the same subject lies strictly closer than the
  /// exclusion radius.
  #[error("Cannot place pin within {radius_m} meters of your existing pins")]
  TooClose { radius_m: f64 },
}

pub type Result<T, E = AdmissionError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn too_close_message_names_the_radius() {
    let err = AdmissionError::TooClose { radius_m: 100.0 };
    assert_eq!(
      err.to_string(),
      "Cannot place pin within 100 meters of your existing pins"
    );
  }
}
