// Classification engine - pure per-row scoring against the reference airport

use crate::domain::aircraft::{
    AltitudeCheck, CargoType, ClassifiedObservation, EtaRisk, HeadingCheck, MovementStatus,
    Observation,
};
use crate::domain::geo::{haversine_km, heading_difference_deg, initial_bearing_deg, NM_PER_KM};

/// YVR reference point.
pub const REFERENCE_LAT: f64 = 49.1947;
pub const REFERENCE_LON: f64 = -123.1792;

const MPS_TO_KNOTS: f64 = 1.943;

/// ETA when the aircraft is too slow to ever arrive.
pub const ETA_SENTINEL_MIN: f64 = 999.0;
const ETA_MIN_SPEED_KNOTS: f64 = 50.0;

/// 3-degree glide slope approximation, ~300 ft per nautical mile.
const GLIDE_SLOPE_FT_PER_NM: f64 = 300.0;
const ALTITUDE_TOLERANCE_FT: f64 = 1500.0;
const HEADING_TOLERANCE_DEG: f64 = 30.0;

const DANGER_SPEED_KNOTS: f64 = 300.0;
const DANGER_DISTANCE_KM: f64 = 50.0;
const DANGER_VERTICAL_RATE_FPM: f64 = 1500.0;

const HOLDING_SPEED_KNOTS: f64 = 120.0;
const HOLDING_VERTICAL_RATE_FPM: f64 = 100.0;

const AIRLINE_PREFIXES: &[(&str, &str)] = &[
    ("ACA", "Air Canada"),
    ("WJA", "WestJet"),
    ("DAL", "Delta"),
    ("UAL", "United"),
    ("FDX", "FedEx"),
    ("UPS", "UPS"),
];

const FREIGHTER_PREFIXES: &[&str] = &["FDX", "UPS"];

/// Derive every classified field for one observation. Returns `None` when a
/// required input is missing; such rows are excluded, not misclassified.
/// Pure apart from the fixed constants above.
pub fn classify(
    observation: &Observation,
    movement_status: MovementStatus,
) -> Option<ClassifiedObservation> {
    let lat = observation.latitude?;
    let lon = observation.longitude?;
    let velocity_mps = observation.velocity_mps?;
    let track = observation.track_deg?;
    let callsign = observation.callsign.as_deref()?;
    let baro_alt = observation.baro_altitude_ft?;
    let vertical_rate = observation.vertical_rate_fpm.unwrap_or(0.0);

    let speed_knots = velocity_mps * MPS_TO_KNOTS;
    let distance_km = haversine_km(lat, lon, REFERENCE_LAT, REFERENCE_LON);
    let distance_nm = distance_km * NM_PER_KM;

    let eta_min = if speed_knots > ETA_MIN_SPEED_KNOTS {
        distance_nm / speed_knots * 60.0
    } else {
        ETA_SENTINEL_MIN
    };

    let expected_altitude_ft = distance_nm * GLIDE_SLOPE_FT_PER_NM;
    let alt_diff = baro_alt - expected_altitude_ft;

    let expected_bearing = initial_bearing_deg(lat, lon, REFERENCE_LAT, REFERENCE_LON);
    let heading_diff = heading_difference_deg(track, expected_bearing);

    let eta_risk = if eta_min > 20.0 {
        EtaRisk::Normal
    } else if eta_min > 10.0 {
        EtaRisk::Tight
    } else {
        EtaRisk::HighRisk
    };

    let altitude_check = if alt_diff > ALTITUDE_TOLERANCE_FT {
        AltitudeCheck::TooHigh
    } else if alt_diff < -ALTITUDE_TOLERANCE_FT {
        AltitudeCheck::Low
    } else {
        AltitudeCheck::Ok
    };

    let heading_check = if heading_diff < HEADING_TOLERANCE_DEG {
        HeadingCheck::Ok
    } else {
        HeadingCheck::OffCourse
    };

    let prefix: String = callsign.chars().take(3).collect::<String>().to_uppercase();
    let airline = AIRLINE_PREFIXES
        .iter()
        .find(|(p, _)| *p == prefix)
        .map(|(_, name)| (*name).to_string())
        .unwrap_or_else(|| "Unknown".to_string());

    let cargo_type = if FREIGHTER_PREFIXES.contains(&prefix.as_str()) {
        CargoType::Freighter
    } else if airline != "Unknown" {
        CargoType::BellyCargo
    } else {
        CargoType::Unknown
    };

    // All five conditions must hold.
    let is_danger = speed_knots > DANGER_SPEED_KNOTS
        && distance_km < DANGER_DISTANCE_KM
        && vertical_rate.abs() > DANGER_VERTICAL_RATE_FPM
        && altitude_check != AltitudeCheck::Ok
        && heading_check != HeadingCheck::Ok;

    let is_holding =
        speed_knots < HOLDING_SPEED_KNOTS && vertical_rate.abs() < HOLDING_VERTICAL_RATE_FPM;

    Some(ClassifiedObservation {
        observation: observation.clone(),
        movement_status,
        speed_knots,
        distance_km,
        distance_nm,
        eta_min,
        eta_risk,
        altitude_check,
        heading_check,
        airline,
        cargo_type,
        is_danger,
        is_holding,
    })
}
