// KPI aggregation - pure reduction over one classified snapshot

use crate::domain::aircraft::ClassifiedObservation;
use crate::domain::kpi::{CongestionLevel, KpiSummary};

/// ETA window (minutes) defining the congestion subset.
const CONGESTION_ETA_MIN: f64 = 15.0;
const CONGESTION_HIGH: f64 = 500.0;
const CONGESTION_MODERATE: f64 = 200.0;

pub fn summarize(aircraft: &[ClassifiedObservation]) -> KpiSummary {
    let total_aircraft = aircraft.len();
    let cargo_aircraft = aircraft.iter().filter(|c| c.cargo_type.is_cargo()).count();

    let avg_eta_min = if total_aircraft > 0 {
        aircraft.iter().map(|c| c.eta_min).sum::<f64>() / total_aircraft as f64
    } else {
        0.0
    };

    let close: Vec<&ClassifiedObservation> = aircraft
        .iter()
        .filter(|c| c.eta_min < CONGESTION_ETA_MIN)
        .collect();
    let n = close.len();

    let (avg_dist, holding_ratio) = if n > 0 {
        let avg_dist = close.iter().map(|c| c.distance_km).sum::<f64>() / n as f64;
        let holding = close.iter().filter(|c| c.is_holding).count();
        (avg_dist, holding as f64 / n as f64)
    } else {
        (0.0, 0.0)
    };

    let congestion_score = n as f64 * avg_dist * holding_ratio;

    let congestion_level = if congestion_score > CONGESTION_HIGH {
        CongestionLevel::High
    } else if congestion_score > CONGESTION_MODERATE {
        CongestionLevel::Moderate
    } else {
        CongestionLevel::Low
    };

    KpiSummary {
        total_aircraft,
        cargo_aircraft,
        avg_eta_min,
        congestion_score,
        congestion_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aircraft::{
        AltitudeCheck, CargoType, EtaRisk, HeadingCheck, MovementStatus, Observation,
    };

    fn classified(eta_min: f64, distance_km: f64, holding: bool, cargo: CargoType) -> ClassifiedObservation {
        ClassifiedObservation {
            observation: Observation {
                icao24: "c06a12".to_string(),
                callsign: Some("ACA123".to_string()),
                origin_country: "Canada".to_string(),
                time_position: None,
                last_contact: None,
                longitude: Some(-123.0),
                latitude: Some(49.0),
                baro_altitude_ft: Some(10_000.0),
                on_ground: false,
                velocity_mps: Some(250.0),
                track_deg: Some(135.0),
                vertical_rate_fpm: Some(0.0),
            },
            movement_status: MovementStatus::Active,
            speed_knots: 485.0,
            distance_km,
            distance_nm: distance_km * 0.539957,
            eta_min,
            eta_risk: EtaRisk::Normal,
            altitude_check: AltitudeCheck::Ok,
            heading_check: HeadingCheck::Ok,
            airline: "Air Canada".to_string(),
            cargo_type: cargo,
            is_danger: false,
            is_holding: holding,
        }
    }

    #[test]
    fn test_empty_snapshot() {
        let kpi = summarize(&[]);
        assert_eq!(kpi.total_aircraft, 0);
        assert_eq!(kpi.cargo_aircraft, 0);
        assert_eq!(kpi.avg_eta_min, 0.0);
        assert_eq!(kpi.congestion_score, 0.0);
        assert_eq!(kpi.congestion_level, CongestionLevel::Low);
    }

    #[test]
    fn test_score_zero_when_nothing_inside_eta_window() {
        let rows = vec![
            classified(30.0, 100.0, true, CargoType::BellyCargo),
            classified(999.0, 20.0, true, CargoType::Freighter),
        ];
        let kpi = summarize(&rows);
        assert_eq!(kpi.congestion_score, 0.0);
        assert_eq!(kpi.congestion_level, CongestionLevel::Low);
        assert_eq!(kpi.cargo_aircraft, 2);
    }

    #[test]
    fn test_counts_and_mean_eta() {
        let rows = vec![
            classified(10.0, 40.0, false, CargoType::BellyCargo),
            classified(20.0, 80.0, false, CargoType::Unknown),
            classified(30.0, 120.0, false, CargoType::Freighter),
        ];
        let kpi = summarize(&rows);
        assert_eq!(kpi.total_aircraft, 3);
        assert_eq!(kpi.cargo_aircraft, 2);
        assert!((kpi.avg_eta_min - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_congestion_score_and_buckets() {
        // 3 close rows, mean distance 40 km, 2/3 holding -> 3 * 40 * 0.667 = 80 -> Low
        let rows = vec![
            classified(5.0, 30.0, true, CargoType::Unknown),
            classified(6.0, 40.0, true, CargoType::Unknown),
            classified(7.0, 50.0, false, CargoType::Unknown),
        ];
        let kpi = summarize(&rows);
        assert!((kpi.congestion_score - 80.0).abs() < 1e-9);
        assert_eq!(kpi.congestion_level, CongestionLevel::Low);

        // 6 close rows, mean 45 km, all holding -> 270 -> Moderate
        let rows: Vec<_> = (0..6).map(|_| classified(5.0, 45.0, true, CargoType::Unknown)).collect();
        let kpi = summarize(&rows);
        assert!((kpi.congestion_score - 270.0).abs() < 1e-9);
        assert_eq!(kpi.congestion_level, CongestionLevel::Moderate);

        // 12 close rows, mean 45 km, all holding -> 540 -> High
        let rows: Vec<_> = (0..12).map(|_| classified(5.0, 45.0, true, CargoType::Unknown)).collect();
        let kpi = summarize(&rows);
        assert_eq!(kpi.congestion_level, CongestionLevel::High);
    }
}
