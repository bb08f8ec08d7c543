//! The presence registry: one record per subject, pruned by age on read.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use beacon_core::position::{PositionRecord, PositionUpdate, resolve_display_name};

pub(crate) struct PresenceRegistry {
  records:         HashMap<String, PositionRecord>,
  stale_threshold: TimeDelta,
}

impl PresenceRegistry {
  pub(crate) fn new(stale_threshold: TimeDelta) -> Self {
    Self {
      records: HashMap::new(),
      stale_threshold,
    }
  }

  /// Insert or replace the record for `update.subject_id`.
  pub(crate) fn upsert(
    &mut self,
    update: PositionUpdate,
    now: DateTime<Utc>,
  ) -> PositionRecord {
    let display_name =
      resolve_display_name(&update.subject_id, update.display_name.as_deref());
    let record = PositionRecord {
      subject_id: update.subject_id,
      display_name,
      coordinates: update.coordinates,
      last_updated: now,
    };
    self.records.insert(record.subject_id.clone(), record.clone());
    record
  }

  /// Returns whether a record was present.
  pub(crate) fn remove(&mut self, subject_id: &str) -> bool {
    self.records.remove(subject_id).is_some()
  }

  /// Drop every record with `now - last_updated > stale_threshold`.
  pub(crate) fn evict(&mut self, now: DateTime<Utc>) -> usize {
    let before = self.records.len();
    let threshold = self.stale_threshold;
    self
      .records
      .retain(|_, r| now.signed_duration_since(r.last_updated) <= threshold);
    let evicted = before - self.records.len();
    if evicted > 0 {
      debug!(evicted, live = self.records.len(), "evicted stale positions");
    }
    evicted
  }

  pub(crate) fn snapshot(&mut self, now: DateTime<Utc>) -> Vec<PositionRecord> {
    self.evict(now);
    self.records.values().cloned().collect()
  }

  pub(crate) fn count(&mut self, now: DateTime<Utc>) -> usize {
    self.evict(now);
    self.records.len()
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use beacon_core::settings::STALE_THRESHOLD;

  use super::*;

  fn t0() -> DateTime<Utc> { Utc.timestamp_opt(1_700_000_000, 0).unwrap() }

  #[test]
  fn upsert_replaces_rather_than_merges() {
    let mut reg = PresenceRegistry::new(STALE_THRESHOLD);
    reg.upsert(PositionUpdate::new("u1", 1.0, 2.0).with_name("Ana"), t0());
    let second = reg.upsert(
      PositionUpdate::new("u1", 3.0, 4.0),
      t0() + TimeDelta::seconds(1),
    );

    assert_eq!(second.display_name, "User u1");
    let all = reg.snapshot(t0() + TimeDelta::seconds(1));
    assert_eq!(all, vec![second]);
  }

  #[test]
  fn eviction_is_strictly_greater_than() {
    let mut reg = PresenceRegistry::new(STALE_THRESHOLD);
    reg.upsert(PositionUpdate::new("u1", 0.0, 0.0), t0());

    assert_eq!(reg.count(t0() + STALE_THRESHOLD), 1);
    assert_eq!(reg.count(t0() + STALE_THRESHOLD + TimeDelta::nanoseconds(1)), 0);
  }

  #[test]
  fn remove_reports_presence() {
    let mut reg = PresenceRegistry::new(STALE_THRESHOLD);
    reg.upsert(PositionUpdate::new("u1", 0.0, 0.0), t0());
    assert!(reg.remove("u1"));
    assert!(!reg.remove("u1"));
  }
}
