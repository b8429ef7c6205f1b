//! Location model for the resolved destination

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

/// Location coordinates
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Destination name as the user typed it
    pub name: String,
}

impl Location {
    /// Create a new location
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, name: String) -> Self {
        Self {
            latitude,
            longitude,
            name,
        }
    }

    /// Format location as coordinates string
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }

    /// Great-circle distance to a point in kilometers
    #[must_use]
    pub fn distance_km(&self, latitude: f64, longitude: f64) -> f64 {
        let from = HaversineLocation {
            latitude: self.latitude,
            longitude: self.longitude,
        };
        let to = HaversineLocation {
            latitude,
            longitude,
        };
        distance(from, to, Units::Kilometers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_coordinates() {
        let location = Location::new(48.856_613, 2.352_222, "Paris".to_string());
        assert_eq!(location.format_coordinates(), "48.8566, 2.3522");
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let location = Location::new(48.8566, 2.3522, "Paris".to_string());
        assert!(location.distance_km(48.8566, 2.3522) < 1e-9);
    }

    #[test]
    fn test_distance_paris_to_london() {
        let paris = Location::new(48.8566, 2.3522, "Paris".to_string());
        let km = paris.distance_km(51.5074, -0.1278);
        assert!((330.0..360.0).contains(&km), "got {km}");
    }
}
