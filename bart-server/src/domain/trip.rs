//! Trip itineraries from the schedule feed.

use serde::Serialize;

use super::station::StationCode;

/// An itinerary request: travel from one station to another, departing now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripQuery {
    pub origin: StationCode,
    pub destination: StationCode,
}

/// One leg of a scheduled itinerary, associated with one route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripLeg {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,

    pub origin: StationCode,

    pub destination: StationCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_time_min: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest_time_min: Option<String>,

    /// Schedule-feed route identifier, e.g. `ROUTE 11`.
    pub line: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub bikeflag: Option<String>,

    /// Head-sign station name as the feed reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_head_station: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub load: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_id: Option<String>,

    /// Head-sign station code, resolved against the route table during
    /// enrichment. Absent when the leg's line is not in the table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub train_head_abbr: Option<StationCode>,
}

/// One itinerary option returned for a trip query.
///
/// Legs preserve the order returned by the upstream schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripOption {
    pub origin: StationCode,

    pub destination: StationCode,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_time_min: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orig_time_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest_time_min: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dest_time_date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_time: Option<String>,

    /// Always `null`: fares are intentionally not relayed.
    pub fares: Option<serde_json::Value>,

    #[serde(rename = "leg")]
    pub legs: Vec<TripLeg>,
}
