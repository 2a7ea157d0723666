// Operational KPI models

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CongestionLevel {
    Low,
    Moderate,
    High,
}

/// Aggregate counts and means over one classified table snapshot. Recomputed
/// on demand; carries no identity across polls.
#[derive(Debug, Clone, Serialize)]
pub struct KpiSummary {
    pub total_aircraft: usize,
    pub cargo_aircraft: usize,
    pub avg_eta_min: f64,
    pub congestion_score: f64,
    pub congestion_level: CongestionLevel,
}
