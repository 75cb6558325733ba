//! Straight-line distance and a flat-speed travel time.

use super::coord::Coordinate;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Flat average speed used for the time estimate. Not a routed time.
pub const AVERAGE_SPEED_KMH: f64 = 50.0;

/// Great-circle distance in kilometres.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    // Rounding can push h past 1 for antipodal points
    let h = (sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon).min(1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelEstimate {
    pub distance_km: f64,
    pub duration_hours: f64,
}

impl TravelEstimate {
    pub fn between(start: Coordinate, end: Coordinate) -> Self {
        let distance_km = haversine_km(start, end);
        Self {
            distance_km,
            duration_hours: distance_km / AVERAGE_SPEED_KMH,
        }
    }

    /// e.g. `"5572.79 km"`
    pub fn distance_label(&self) -> String {
        format!("{:.2} km", self.distance_km)
    }

    /// e.g. `"111.46 hrs"`
    pub fn time_label(&self) -> String {
        format!("{:.2} hrs", self.duration_hours)
    }
}
