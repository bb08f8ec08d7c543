//! [`MemoryStore`] — the in-memory implementation of [`GeoStore`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use beacon_core::{
  Result,
  clock::{Clock, SystemClock},
  geo::Coordinates,
  pin::{AlertPin, NewPin, PinDistance},
  position::{PositionRecord, PositionUpdate},
  settings::StoreSettings,
  store::{GeoStore, Snapshot, SweepReport},
};

use crate::{pins::PinRegistry, presence::PresenceRegistry};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Beacon store held entirely in process memory.
///
/// Lock order: whenever both registries are needed, `presence` is taken
/// before `pins`.
pub struct MemoryStore<C: Clock = SystemClock> {
  presence: Mutex<PresenceRegistry>,
  pins:     Mutex<PinRegistry>,
  clock:    C,
  settings: StoreSettings,
}

impl MemoryStore<SystemClock> {
  /// A store with production settings and wall-clock time.
  pub fn new() -> Self { Self::with_clock(StoreSettings::default(), SystemClock) }
}

impl Default for MemoryStore<SystemClock> {
  fn default() -> Self { Self::new() }
}

impl<C: Clock> MemoryStore<C> {
  pub fn with_clock(settings: StoreSettings, clock: C) -> Self {
    Self {
      presence: Mutex::new(PresenceRegistry::new(settings.stale_threshold)),
      pins: Mutex::new(PinRegistry::new(
        settings.pin_threshold,
        settings.exclusion_radius_m,
      )),
      clock,
      settings,
    }
  }

  pub fn settings(&self) -> &StoreSettings { &self.settings }

  fn presence(&self) -> MutexGuard<'_, PresenceRegistry> {
    lock(&self.presence)
  }

  fn pins(&self) -> MutexGuard<'_, PinRegistry> { lock(&self.pins) }
}

/// Every critical section leaves its map consistent, so a panic elsewhere
/// while holding the guard does not invalidate the data.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
  mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ─── GeoStore impl ───────────────────────────────────────────────────────────

impl<C: Clock> GeoStore for MemoryStore<C> {
  fn update_position(&self, update: PositionUpdate) -> PositionRecord {
    let mut presence = self.presence();
    let record = presence.upsert(update, self.clock.now());
    debug!(subject_id = %record.subject_id, "position updated");
    record
  }

  fn remove_position(&self, subject_id: &str) {
    if self.presence().remove(subject_id) {
      debug!(subject_id, "position removed");
    }
  }

  fn position_count(&self) -> usize {
    let mut presence = self.presence();
    presence.count(self.clock.now())
  }

  fn place_pin(&self, pin: NewPin) -> Result<AlertPin> {
    // Held across evict, check and insert.
    let mut pins = self.pins();
    pins.try_place(pin, self.clock.now())
  }

  fn pin_count(&self) -> usize {
    let mut pins = self.pins();
    pins.count(self.clock.now())
  }

  fn nearest_pin(&self, at: Coordinates) -> Option<PinDistance> {
    let mut pins = self.pins();
    pins.nearest(at, self.clock.now())
  }

  fn read_snapshot(&self) -> Snapshot {
    let mut presence = self.presence();
    let mut pins = self.pins();
    let now = self.clock.now();
    Snapshot {
      positions: presence.snapshot(now),
      pins:      pins.snapshot(now),
    }
  }

  fn sweep(&self) -> SweepReport {
    let mut presence = self.presence();
    let mut pins = self.pins();
    let now = self.clock.now();
    SweepReport {
      positions_evicted: presence.evict(now),
      pins_evicted:      pins.evict(now),
    }
  }
}
