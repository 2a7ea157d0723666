// Vessel domain model

use serde::Serialize;

/// One vessel position from the VesselFinder list API.
#[derive(Debug, Clone, Serialize)]
pub struct Vessel {
    pub mmsi: Option<i64>,
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub speed: f64,
    pub vessel_type: Option<String>,
}
