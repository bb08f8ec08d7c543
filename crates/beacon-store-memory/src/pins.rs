//! The alert pin registry and its spatial admission rule.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;
use uuid::Uuid;

use beacon_core::{
  AdmissionError, Result,
  geo::{Coordinates, haversine_m},
  pin::{AlertPin, NewPin, PinDistance, derive_pin_id},
  position::resolve_display_name,
};

pub(crate) struct PinRegistry {
  pins:               HashMap<Uuid, AlertPin>,
  pin_threshold:      TimeDelta,
  exclusion_radius_m: f64,
}

impl PinRegistry {
  pub(crate) fn new(pin_threshold: TimeDelta, exclusion_radius_m: f64) -> Self {
    Self {
      pins: HashMap::new(),
      pin_threshold,
      exclusion_radius_m,
    }
  }

  /// Evict, check the creator's own live pins, then insert.
  ///
  /// Pins that expired before `now` are gone by the time the check runs, so
  /// they never block a placement. Pins from other subjects are ignored.
  pub(crate) fn try_place(
    &mut self,
    new: NewPin,
    now: DateTime<Utc>,
  ) -> Result<AlertPin> {
    self.evict(now);

    let radius = self.exclusion_radius_m;
    let blocked = self
      .pins
      .values()
      .filter(|p| p.raised_by == new.raised_by)
      .any(|p| haversine_m(p.coordinates, new.coordinates) < radius);
    if blocked {
      debug!(raised_by = %new.raised_by, "pin rejected: too close to an own pin");
      return Err(AdmissionError::TooClose { radius_m: radius });
    }

    let pin_id = self.fresh_id(&new.raised_by, now);
    let pin = AlertPin {
      pin_id,
      raised_by_name: resolve_display_name(
        &new.raised_by,
        new.raised_by_name.as_deref(),
      ),
      raised_by: new.raised_by,
      coordinates: new.coordinates,
      created_at: now,
    };
    self.pins.insert(pin_id, pin.clone());
    debug!(%pin_id, raised_by = %pin.raised_by, live = self.pins.len(), "pin placed");
    Ok(pin)
  }

  fn fresh_id(&self, raised_by: &str, now: DateTime<Utc>) -> Uuid {
    let mut attempt = 0;
    loop {
      let id = derive_pin_id(raised_by, now, attempt);
      if !self.pins.contains_key(&id) {
        return id;
      }
      attempt += 1;
    }
  }

  /// Drop every pin with `now - created_at > pin_threshold`.
  pub(crate) fn evict(&mut self, now: DateTime<Utc>) -> usize {
    let before = self.pins.len();
    let threshold = self.pin_threshold;
    self
      .pins
      .retain(|_, p| now.signed_duration_since(p.created_at) <= threshold);
    let evicted = before - self.pins.len();
    if evicted > 0 {
      debug!(evicted, live = self.pins.len(), "evicted expired pins");
    }
    evicted
  }

  pub(crate) fn snapshot(&mut self, now: DateTime<Utc>) -> Vec<AlertPin> {
    self.evict(now);
    self.pins.values().cloned().collect()
  }

  pub(crate) fn count(&mut self, now: DateTime<Utc>) -> usize {
    self.evict(now);
    self.pins.len()
  }

  pub(crate) fn nearest(
    &mut self,
    at: Coordinates,
    now: DateTime<Utc>,
  ) -> Option<PinDistance> {
    self.evict(now);
    self
      .pins
      .values()
      .map(|p| (p, haversine_m(at, p.coordinates)))
      .min_by(|(_, a), (_, b)| a.total_cmp(b))
      .map(|(pin, distance_m)| PinDistance {
        pin: pin.clone(),
        distance_m,
      })
  }
}
