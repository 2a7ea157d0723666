// Aircraft domain models - raw state vectors and their classified form

use serde::Serialize;
use std::fmt;

/// One vehicle's instantaneous state as decoded from a single state vector.
/// Immutable once fetched; the next poll supersedes it rather than mutating.
#[derive(Debug, Clone, Serialize)]
pub struct Observation {
    pub icao24: String,
    pub callsign: Option<String>,
    pub origin_country: String,
    pub time_position: Option<i64>,
    pub last_contact: Option<i64>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub baro_altitude_ft: Option<f64>,
    pub on_ground: bool,
    pub velocity_mps: Option<f64>,
    pub track_deg: Option<f64>,
    pub vertical_rate_fpm: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementStatus {
    Unknown,
    Active,
    IdleFiveToTen,
    IdleOverTen,
}

impl fmt::Display for MovementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MovementStatus::Unknown => "Unknown",
            MovementStatus::Active => "Active",
            MovementStatus::IdleFiveToTen => "Idle 5-10 min",
            MovementStatus::IdleOverTen => "Idle >10 min",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EtaRisk {
    Normal,
    Tight,
    HighRisk,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AltitudeCheck {
    Ok,
    TooHigh,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingCheck {
    Ok,
    OffCourse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CargoType {
    Freighter,
    BellyCargo,
    Unknown,
}

impl CargoType {
    pub fn is_cargo(&self) -> bool {
        matches!(self, CargoType::Freighter | CargoType::BellyCargo)
    }
}

/// An Observation extended with every derived field. Built fresh on each
/// classification pass and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ClassifiedObservation {
    #[serde(flatten)]
    pub observation: Observation,
    pub movement_status: MovementStatus,
    pub speed_knots: f64,
    pub distance_km: f64,
    pub distance_nm: f64,
    pub eta_min: f64,
    pub eta_risk: EtaRisk,
    pub altitude_check: AltitudeCheck,
    pub heading_check: HeadingCheck,
    pub airline: String,
    pub cargo_type: CargoType,
    pub is_danger: bool,
    pub is_holding: bool,
}
