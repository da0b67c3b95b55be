//! Geographic coordinates and distance.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Euclidean distance between two coordinates in raw degree space.
///
/// This is deliberately not geodesic. At the regional scale of the BART
/// network the error is acceptable for choosing nearby stations, and it
/// keeps the ranking cheap and dependency-free.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    ((a.lat - b.lat).powi(2) + (a.lng - b.lng).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OAKLAND: Coordinate = Coordinate {
        lat: 37.803768,
        lng: -122.27145,
    };

    const DALY_CITY: Coordinate = Coordinate {
        lat: 37.70612055,
        lng: -122.4690807,
    };

    #[test]
    fn distance_to_self_is_zero() {
        assert_eq!(distance(OAKLAND, OAKLAND), 0.0);
        assert_eq!(distance(DALY_CITY, DALY_CITY), 0.0);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(distance(OAKLAND, DALY_CITY), distance(DALY_CITY, OAKLAND));
    }

    #[test]
    fn known_distance() {
        let a = Coordinate { lat: 0.0, lng: 0.0 };
        let b = Coordinate { lat: 3.0, lng: 4.0 };
        assert_eq!(distance(a, b), 5.0);
    }

    #[test]
    fn deserialize_from_request_shape() {
        let c: Coordinate = serde_json::from_str(r#"{"lat": 37.8, "lng": -122.27}"#).unwrap();
        assert_eq!(c.lat, 37.8);
        assert_eq!(c.lng, -122.27);
    }
}
