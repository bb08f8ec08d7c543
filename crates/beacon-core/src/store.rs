//! The `GeoStore` trait and the value types it returns.
//!
//! The trait is implemented by storage backends (e.g. `beacon-store-memory`).
//! The HTTP layer (`beacon-api`) depends on this abstraction, not on any
//! concrete backend.

use serde::{Deserialize, Serialize};

use crate::{
  Result,
  geo::Coordinates,
  pin::{AlertPin, NewPin, PinDistance},
  position::{PositionRecord, PositionUpdate},
};

// ─── Read models ─────────────────────────────────────────────────────────────

/// Live positions and pins, taken at a single instant.
///
/// Neither half may reflect a later moment than the other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
  pub positions: Vec<PositionRecord>,
  pub pins:      Vec<AlertPin>,
}

/// What a [`GeoStore::sweep`] removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepReport {
  pub positions_evicted: usize,
  pub pins_evicted:      usize,
}

impl SweepReport {
  pub fn is_empty(&self) -> bool {
    self.positions_evicted == 0 && self.pins_evicted == 0
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over an ephemeral geospatial store.
///
/// Every read evicts expired entries before answering; there is no separate
/// expiry process a caller has to run. Results are always copies, never live
/// references into the store.
///
/// Implementations are purely in-memory and never block on I/O, so the
/// methods are synchronous and safe to call from async handlers.
pub trait GeoStore: Send + Sync {
  // ── Presence ──────────────────────────────────────────────────────────

  /// Record where a subject is. Replaces any previous record for the same
  /// subject in full, including its display name.
  fn update_position(&self, update: PositionUpdate) -> PositionRecord;

  /// Forget a subject's position. Removing an absent subject is a no-op.
  fn remove_position(&self, subject_id: &str);

  /// Number of live positions.
  fn position_count(&self) -> usize;

  // ── Pins ──────────────────────────────────────────────────────────────

  /// Admit a new pin unless the same subject already has a live pin strictly
  /// inside the exclusion radius. The check and the insert are atomic.
  fn place_pin(&self, pin: NewPin) -> Result<AlertPin>;

  /// Number of live pins.
  fn pin_count(&self) -> usize;

  /// The live pin closest to `at`, if any.
  fn nearest_pin(&self, at: Coordinates) -> Option<PinDistance>;

  // ── Whole-store ───────────────────────────────────────────────────────

  /// Live positions and pins as of one instant.
  fn read_snapshot(&self) -> Snapshot;

  /// Evict everything expired without reading it back.
  fn sweep(&self) -> SweepReport;
}
