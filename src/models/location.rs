// Location model representing a geographic coordinate

use geo::{HaversineDistance, Point};
use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    /// Creates a new location from latitude and longitude
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Creates a location from a (longitude, latitude) pair, the order road
    /// geometries use
    pub fn from_lon_lat((lon, lat): (f64, f64)) -> Self {
        Self { lat, lon }
    }

    /// Converts to a geo point (x = longitude, y = latitude)
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    /// Great-circle distance in kilometres.
    ///
    /// The endpoints are put in a canonical order first so that
    /// `a.haversine_km_to(&b)` and `b.haversine_km_to(&a)` are bit-identical.
    pub fn haversine_km_to(&self, other: &Location) -> f64 {
        let (first, second) = if self.key() <= other.key() {
            (self, other)
        } else {
            (other, self)
        };
        first.to_point().haversine_distance(&second.to_point()) / 1000.0
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }

    /// Bit-exact hashable key
    pub(crate) fn key(&self) -> (u64, u64) {
        // -0.0 and 0.0 name the same coordinate
        ((self.lat + 0.0).to_bits(), (self.lon + 0.0).to_bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let loc = Location::new(27.1767, 78.0081);
        assert_eq!(loc.haversine_km_to(&loc), 0.0);
    }

    #[test]
    fn test_known_distance() {
        // Agra to Mathura is roughly 50 km as the crow flies
        let agra = Location::new(27.1767, 78.0081);
        let mathura = Location::new(27.4979, 77.6711);
        let dist = agra.haversine_km_to(&mathura);
        assert!(dist > 45.0 && dist < 55.0, "got {}", dist);
    }

    #[test]
    fn test_symmetric() {
        let a = Location::new(29.4677, 77.6731);
        let b = Location::new(27.3944, 79.9841);
        assert_eq!(a.haversine_km_to(&b), b.haversine_km_to(&a));
    }

    #[test]
    fn test_from_lon_lat() {
        let loc = Location::from_lon_lat((78.0, 27.0));
        assert_eq!(loc.lat, 27.0);
        assert_eq!(loc.lon, 78.0);
    }
}
