// Radar snapshot model - one poll cycle's output

use super::aircraft::ClassifiedObservation;
use super::kpi::KpiSummary;
use serde::Serialize;

/// The classified table for one poll cycle plus its KPI reduction. When the
/// feed fails for the whole cycle the table is empty and `feed_error` carries
/// the user-visible signal; no failure is fatal to the process.
#[derive(Debug, Clone, Serialize)]
pub struct RadarSnapshot {
    pub aircraft: Vec<ClassifiedObservation>,
    pub kpi: KpiSummary,
    pub feed_error: Option<String>,
}
