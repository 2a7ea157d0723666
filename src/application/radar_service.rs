// Radar service - Use case driving one poll cycle

use crate::application::classifier::classify;
use crate::application::kpi::summarize;
use crate::application::movement::MovementTracker;
use crate::application::state_feed::StateVectorFeed;
use crate::domain::aircraft::ClassifiedObservation;
use crate::domain::geo::Bbox;
use crate::domain::snapshot::RadarSnapshot;
use std::sync::Arc;
use tokio::sync::Mutex;

const FETCH_RETRIES: u32 = 3;

/// Orchestrates fetch -> movement annotation -> classification -> KPI for one
/// poll cycle. The movement map is serialized behind a mutex so overlapping
/// cycles cannot lose updates.
#[derive(Clone)]
pub struct RadarService {
    feed: Arc<dyn StateVectorFeed>,
    tracker: Arc<Mutex<MovementTracker>>,
}

impl RadarService {
    pub fn new(feed: Arc<dyn StateVectorFeed>) -> Self {
        Self {
            feed,
            tracker: Arc::new(Mutex::new(MovementTracker::new())),
        }
    }

    /// Run one poll cycle. Feed failures degrade to an empty table with the
    /// error carried on the snapshot; the next cycle simply retries.
    pub async fn snapshot(&self, bbox: Bbox, cargo_only: bool) -> RadarSnapshot {
        let (observations, feed_error) = match self.feed.fetch(bbox, FETCH_RETRIES).await {
            Ok(rows) => (rows, None),
            Err(e) => {
                tracing::warn!(error = %e, "no aircraft data this cycle");
                (Vec::new(), Some(e.to_string()))
            }
        };

        // Track every fetched row; missing-field exclusion is a precondition
        // of classification only, so an aircraft with a gap in one field
        // still refreshes its movement record.
        let statuses = {
            let mut tracker = self.tracker.lock().await;
            tracker.annotate(&observations)
        };

        let mut aircraft: Vec<ClassifiedObservation> = observations
            .iter()
            .zip(statuses)
            .filter_map(|(obs, status)| classify(obs, status))
            .collect();

        if cargo_only {
            aircraft.retain(|c| c.cargo_type.is_cargo());
        }

        let kpi = summarize(&aircraft);

        RadarSnapshot {
            aircraft,
            kpi,
            feed_error,
        }
    }
}
