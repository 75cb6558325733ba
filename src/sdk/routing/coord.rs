use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in degrees, latitude first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Builds a coordinate from the `[lon, lat]` pair used by GeoJSON and OSRM.
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self::new(pair[1], pair[0])
    }

    /// The `[lon, lat]` pair used by GeoJSON and OSRM.
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lon, self.lat]
    }

    /// Whether latitude is in [-90, 90] and longitude in [-180, 180].
    /// Nothing rejects out-of-range points; this only feeds diagnostics.
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lon_lat_order_is_inverted() {
        let c = Coordinate::from_lon_lat([-0.1278, 51.5074]);
        assert_eq!(c, Coordinate::new(51.5074, -0.1278));
        assert_eq!(c.to_lon_lat(), [-0.1278, 51.5074]);
    }

    #[test]
    fn range_check() {
        assert!(Coordinate::new(90.0, -180.0).in_range());
        assert!(!Coordinate::new(91.0, 0.0).in_range());
        assert!(!Coordinate::new(0.0, 180.5).in_range());
    }
}
