//! Time sources.
//!
//! Stores never call `Utc::now()` directly; they ask a [`Clock`]. Tests use
//! [`ManualClock`] to pin expiry boundaries to the millisecond.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> { Utc::now() }
}

/// A clock that only moves when told to.
///
/// Cloning shares the underlying instant, so a test can keep one handle and
/// hand another to the store.
#[derive(Debug, Clone)]
pub struct ManualClock {
  now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
  pub fn new(start: DateTime<Utc>) -> Self {
    Self {
      now: Arc::new(Mutex::new(start)),
    }
  }

  pub fn set(&self, instant: DateTime<Utc>) {
    *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
  }

  pub fn advance(&self, by: TimeDelta) {
    let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
    *now += by;
  }
}

impl Clock for ManualClock {
  fn now(&self) -> DateTime<Utc> {
    *self.now.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  #[test]
  fn manual_clock_is_shared_between_clones() {
    let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let clock = ManualClock::new(start);
    let handle = clock.clone();

    handle.advance(TimeDelta::seconds(5));
    assert_eq!(clock.now(), start + TimeDelta::seconds(5));

    handle.set(start);
    assert_eq!(clock.now(), start);
  }
}
