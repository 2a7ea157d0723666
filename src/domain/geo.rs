// Geometry helpers - spherical distance, bearing, bounding boxes

use serde::{Deserialize, Serialize};

pub const EARTH_RADIUS_KM: f64 = 6371.0;
pub const NM_PER_KM: f64 = 0.539957;

/// Query bounding box in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub lat_min: f64,
    pub lon_min: f64,
    pub lat_max: f64,
    pub lon_max: f64,
}

impl Bbox {
    pub fn new(lat_min: f64, lon_min: f64, lat_max: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lon_min,
            lat_max,
            lon_max,
        }
    }

    /// Cache key with bit-exact float identity. Two calls hit the same cache
    /// entry only when the bbox arguments are identical.
    pub fn key(&self) -> [u64; 4] {
        [
            self.lat_min.to_bits(),
            self.lon_min.to_bits(),
            self.lat_max.to_bits(),
            self.lon_max.to_bits(),
        ]
    }
}

/// Great-circle distance in kilometers (haversine, mean Earth radius).
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Initial great-circle bearing from point 1 to point 2, degrees in [0, 360).
pub fn initial_bearing_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let delta_lon = (lon2 - lon1).to_radians();
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();

    let x = delta_lon.sin() * lat2_rad.cos();
    let y = lat1_rad.cos() * lat2_rad.sin() - lat1_rad.sin() * lat2_rad.cos() * delta_lon.cos();

    (x.atan2(y).to_degrees() + 360.0) % 360.0
}

/// Smallest-angle difference between two headings, degrees in [0, 180].
pub fn heading_difference_deg(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    diff.min(360.0 - diff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_known_distance() {
        // 49.0/-123.0 to YVR (49.1947/-123.1792), spherical
        let d = haversine_km(49.0, -123.0, 49.1947, -123.1792);
        assert!((d - 25.28).abs() < 0.1, "got {d}");
    }

    #[test]
    fn test_haversine_zero_for_same_point() {
        assert_eq!(haversine_km(49.0, -123.0, 49.0, -123.0), 0.0);
    }

    #[test]
    fn test_bearing_due_east_on_equator() {
        let b = initial_bearing_deg(0.0, 0.0, 0.0, 1.0);
        assert!((b - 90.0).abs() < 1e-9, "got {b}");
    }

    #[test]
    fn test_bearing_due_north() {
        let b = initial_bearing_deg(0.0, 0.0, 1.0, 0.0);
        assert!(b.abs() < 1e-9, "got {b}");
    }

    #[test]
    fn test_heading_difference_wraps_around_north() {
        assert!((heading_difference_deg(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((heading_difference_deg(10.0, 350.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_bbox_key_distinguishes_boxes() {
        let a = Bbox::new(47.0, -134.0, 55.0, -118.0);
        let b = Bbox::new(30.0, -150.0, 60.0, -100.0);
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), Bbox::new(47.0, -134.0, 55.0, -118.0).key());
    }
}
