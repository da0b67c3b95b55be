//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::departures::StationDepartures;
use crate::directions::TripDirections;
use crate::domain::{Line, Station, StationCode, TripOption};

/// One trip request in a `/directions` body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripRequest {
    /// Origin station code
    pub start_code: String,

    /// Destination station code
    pub end_code: String,
}

/// A station with its distance and live departure board.
#[derive(Debug, Serialize)]
pub struct StationWithLines {
    #[serde(flatten)]
    pub station: Station,
    pub distance: f64,
    pub lines: Vec<Line>,
}

/// A station whose board couldn't be fetched, with the reason.
#[derive(Debug, Serialize)]
pub struct StationFailure {
    pub abbr: StationCode,
    pub distance: f64,
    pub error: String,
}

/// One `/bart` response entry.
///
/// Serialized untagged, so successful entries keep the plain station shape.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum StationEntry {
    Departures(StationWithLines),
    Failed(StationFailure),
}

impl From<StationDepartures> for StationEntry {
    fn from(d: StationDepartures) -> Self {
        match d.lines {
            Ok(lines) => StationEntry::Departures(StationWithLines {
                station: d.station,
                distance: d.distance,
                lines,
            }),
            Err(e) => StationEntry::Failed(StationFailure {
                abbr: d.station.abbr,
                distance: d.distance,
                error: e.to_string(),
            }),
        }
    }
}

/// One `/directions` response entry: this trip's itinerary options, or the
/// reason they couldn't be fetched.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TripEntry {
    Options(Vec<TripOption>),
    Failed { error: String },
}

impl From<TripDirections> for TripEntry {
    fn from(d: TripDirections) -> Self {
        match d.options {
            Ok(options) => TripEntry::Options(options),
            Err(e) => TripEntry::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Uniform error envelope for failed requests.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query parameters for the analytics summary endpoint.
#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    /// Look-back window in days (default 1)
    pub days: Option<u32>,

    /// `explicit` restricts to header-identified events
    pub identification: Option<String>,
}

/// Analytics summary as served to the admin surface.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummaryResponse {
    /// Bucket start times, RFC 3339.
    pub time_periods: Vec<String>,
    pub unique_sessions: Vec<u64>,
    pub unique_users: Vec<u64>,
    pub requests: Vec<u64>,
    pub totals: TotalsResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsResponse {
    pub unique_sessions: u64,
    pub unique_users: u64,
    pub requests: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bart::BartError;

    fn station() -> Station {
        Station {
            abbr: StationCode::parse("12TH").unwrap(),
            name: "12th St. Oakland City Center".to_string(),
            latitude: 37.803768,
            longitude: -122.27145,
            address: None,
            city: None,
            county: None,
            state: None,
            zipcode: None,
            entrances: None,
        }
    }

    #[test]
    fn successful_entry_keeps_the_plain_station_shape() {
        let entry = StationEntry::from(StationDepartures {
            station: station(),
            distance: 0.0,
            lines: Ok(vec![]),
        });

        let value = serde_json::to_value(&entry).unwrap();
        // Flattened station fields sit next to distance and lines
        assert_eq!(value["abbr"], "12TH");
        assert_eq!(value["gtfs_latitude"], 37.803768);
        assert_eq!(value["distance"], 0.0);
        assert!(value["lines"].is_array());
        assert!(value.get("error").is_none());
    }

    #[test]
    fn failed_entry_reports_the_reason() {
        let entry = StationEntry::from(StationDepartures {
            station: station(),
            distance: 0.5,
            lines: Err(BartError::Timeout),
        });

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["abbr"], "12TH");
        assert_eq!(value["distance"], 0.5);
        assert!(value["error"].as_str().unwrap().contains("timed out"));
        assert!(value.get("lines").is_none());
    }

    #[test]
    fn trip_request_uses_camel_case_keys() {
        let req: TripRequest =
            serde_json::from_str(r#"{"startCode": "DUBL", "endCode": "DALY"}"#).unwrap();
        assert_eq!(req.start_code, "DUBL");
        assert_eq!(req.end_code, "DALY");
    }

    #[test]
    fn successful_trip_entry_is_a_plain_array() {
        let entry = TripEntry::Options(vec![]);
        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.is_array());
    }
}
