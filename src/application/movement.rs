// Movement tracker - per-aircraft inactivity bucketing

use crate::domain::aircraft::{MovementStatus, Observation};
use crate::domain::geo::haversine_km;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

const IDLE_LONG_SECS: f64 = 600.0;
const IDLE_SHORT_SECS: f64 = 300.0;
const IDLE_RADIUS_KM: f64 = 0.2;

/// Last-seen position and time for one aircraft.
#[derive(Debug, Clone)]
pub struct MovementRecord {
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: DateTime<Utc>,
}

/// Maps icao24 to its last-known position and classifies each new observation
/// against it. Owns its state outright; callers that share a tracker across
/// concurrent poll cycles must serialize access. Entries are never evicted,
/// so the map grows with the number of distinct aircraft seen.
#[derive(Debug, Default)]
pub struct MovementTracker {
    last_positions: HashMap<String, MovementRecord>,
}

impl MovementTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify each observation in row order and overwrite its record.
    pub fn annotate(&mut self, observations: &[Observation]) -> Vec<MovementStatus> {
        self.annotate_at(Utc::now(), observations)
    }

    /// `annotate` with an explicit clock.
    pub fn annotate_at(
        &mut self,
        now: DateTime<Utc>,
        observations: &[Observation],
    ) -> Vec<MovementStatus> {
        observations
            .iter()
            .map(|obs| self.classify_one(now, obs))
            .collect()
    }

    fn classify_one(&mut self, now: DateTime<Utc>, obs: &Observation) -> MovementStatus {
        let (Some(lat), Some(lon)) = (obs.latitude, obs.longitude) else {
            return MovementStatus::Unknown;
        };

        let status = match self.last_positions.get(&obs.icao24) {
            None => MovementStatus::Unknown,
            Some(prev) => {
                let elapsed = (now - prev.timestamp).num_milliseconds() as f64 / 1000.0;
                let moved = haversine_km(lat, lon, prev.latitude, prev.longitude);
                // The >10 min bucket must win when both idle conditions hold.
                if elapsed > IDLE_LONG_SECS && moved < IDLE_RADIUS_KM {
                    MovementStatus::IdleOverTen
                } else if elapsed > IDLE_SHORT_SECS && moved < IDLE_RADIUS_KM {
                    MovementStatus::IdleFiveToTen
                } else {
                    MovementStatus::Active
                }
            }
        };

        self.last_positions.insert(
            obs.icao24.clone(),
            MovementRecord {
                latitude: lat,
                longitude: lon,
                timestamp: now,
            },
        );
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn observation(icao24: &str, lat: f64, lon: f64) -> Observation {
        Observation {
            icao24: icao24.to_string(),
            callsign: Some("ACA123".to_string()),
            origin_country: "Canada".to_string(),
            time_position: None,
            last_contact: None,
            longitude: Some(lon),
            latitude: Some(lat),
            baro_altitude_ft: Some(10_000.0),
            on_ground: false,
            velocity_mps: Some(200.0),
            track_deg: Some(135.0),
            vertical_rate_fpm: Some(0.0),
        }
    }

    #[test]
    fn test_first_sighting_is_unknown() {
        let mut tracker = MovementTracker::new();
        let statuses = tracker.annotate(&[observation("abc123", 49.0, -123.0)]);
        assert_eq!(statuses, vec![MovementStatus::Unknown]);
    }

    #[test]
    fn test_missing_position_stays_unknown_without_state_update() {
        let mut tracker = MovementTracker::new();
        let mut obs = observation("abc123", 49.0, -123.0);
        obs.latitude = None;
        assert_eq!(tracker.annotate(&[obs]), vec![MovementStatus::Unknown]);
        // Still no record, so a later complete observation is also first-seen.
        let statuses = tracker.annotate(&[observation("abc123", 49.0, -123.0)]);
        assert_eq!(statuses, vec![MovementStatus::Unknown]);
    }

    #[test]
    fn test_long_idle_wins_over_short_idle_bucket() {
        // 601s elapsed, ~0.1km moved satisfies both idle branches; the
        // >10 min bucket must be reported.
        let mut tracker = MovementTracker::new();
        let t0 = Utc::now();
        tracker.annotate_at(t0, &[observation("abc123", 49.0, -123.0)]);

        let t1 = t0 + Duration::seconds(601);
        let statuses = tracker.annotate_at(t1, &[observation("abc123", 49.0009, -123.0)]);
        assert_eq!(statuses, vec![MovementStatus::IdleOverTen]);
    }

    #[test]
    fn test_short_idle_bucket() {
        let mut tracker = MovementTracker::new();
        let t0 = Utc::now();
        tracker.annotate_at(t0, &[observation("abc123", 49.0, -123.0)]);

        let t1 = t0 + Duration::seconds(301);
        let statuses = tracker.annotate_at(t1, &[observation("abc123", 49.0, -123.0)]);
        assert_eq!(statuses, vec![MovementStatus::IdleFiveToTen]);
    }

    #[test]
    fn test_moving_aircraft_is_active_even_after_long_gap() {
        let mut tracker = MovementTracker::new();
        let t0 = Utc::now();
        tracker.annotate_at(t0, &[observation("abc123", 49.0, -123.0)]);

        let t1 = t0 + Duration::seconds(900);
        let statuses = tracker.annotate_at(t1, &[observation("abc123", 49.5, -123.0)]);
        assert_eq!(statuses, vec![MovementStatus::Active]);
    }

    #[test]
    fn test_quick_reobservation_is_active() {
        let mut tracker = MovementTracker::new();
        let t0 = Utc::now();
        tracker.annotate_at(t0, &[observation("abc123", 49.0, -123.0)]);

        let t1 = t0 + Duration::seconds(10);
        let statuses = tracker.annotate_at(t1, &[observation("abc123", 49.0, -123.0)]);
        assert_eq!(statuses, vec![MovementStatus::Active]);
    }

    #[test]
    fn test_record_overwritten_every_pass() {
        // Two idle passes 301s apart each compare against the previous pass,
        // not the first one.
        let mut tracker = MovementTracker::new();
        let t0 = Utc::now();
        tracker.annotate_at(t0, &[observation("abc123", 49.0, -123.0)]);
        let t1 = t0 + Duration::seconds(301);
        tracker.annotate_at(t1, &[observation("abc123", 49.0, -123.0)]);
        let t2 = t1 + Duration::seconds(301);
        let statuses = tracker.annotate_at(t2, &[observation("abc123", 49.0, -123.0)]);
        assert_eq!(statuses, vec![MovementStatus::IdleFiveToTen]);
    }
}
