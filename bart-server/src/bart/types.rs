//! BART API response DTOs.
//!
//! These types map directly to the BART legacy JSON API responses. The feed
//! wraps everything in a `root` object, sends numeric fields as strings, and
//! omits fields rather than sending null in several places, so `Option` is
//! used liberally.

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Station list (`stn.aspx?cmd=stns`)
// ---------------------------------------------------------------------------

/// Response from the station list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StationsApiResponse {
    pub root: StationsRoot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationsRoot {
    pub stations: StationsWrapper,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationsWrapper {
    pub station: Vec<RawStation>,
}

/// A station as the feed sends it. Coordinates arrive as strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStation {
    pub name: String,
    pub abbr: String,
    pub gtfs_latitude: String,
    pub gtfs_longitude: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
}

// ---------------------------------------------------------------------------
// Route list (`route.aspx?cmd=routes`)
// ---------------------------------------------------------------------------

/// Response from the route list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RoutesApiResponse {
    pub root: RoutesRoot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutesRoot {
    pub routes: RoutesWrapper,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutesWrapper {
    pub route: Vec<RawRoute>,
}

/// A route as the feed sends it. `abbr` is a composite `ORIG-HEAD` code and
/// `number` is a stringified integer.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRoute {
    pub name: String,
    pub abbr: String,
    #[serde(rename = "routeID")]
    pub route_id: String,
    pub number: String,
    pub hexcolor: String,
    pub color: String,
}

// ---------------------------------------------------------------------------
// Real-time estimates (`etd.aspx?cmd=etd`)
// ---------------------------------------------------------------------------

/// Response from the real-time estimates endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct EtdApiResponse {
    pub root: EtdRoot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EtdRoot {
    /// The feed omits this entirely for unknown stations.
    #[serde(default)]
    pub station: Vec<EtdStation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EtdStation {
    /// Destination groups. Omitted when no trains are running.
    pub etd: Option<Vec<RawEtd>>,
}

/// One destination group on a departure board.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEtd {
    pub destination: String,
    pub abbreviation: String,
    pub estimate: Vec<RawEstimate>,
}

/// One estimate as the feed sends it. `minutes` is a string and may be the
/// literal `"Leaving"`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEstimate {
    pub minutes: String,
    pub platform: String,
    pub direction: String,
    pub length: String,
    pub hexcolor: String,
}

// ---------------------------------------------------------------------------
// Trip schedules (`sched.aspx?cmd=depart`)
// ---------------------------------------------------------------------------
//
// The schedule feed prefixes attribute-derived keys with `@` markers; the
// client strips those from the body before these types are parsed.

/// Response from the schedule depart endpoint, after `@`-stripping.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedApiResponse {
    pub root: SchedRoot,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedRoot {
    pub schedule: RawSchedule,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSchedule {
    pub request: RawScheduleRequest,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawScheduleRequest {
    pub trip: Vec<RawTrip>,
}

/// One itinerary option as the feed sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTrip {
    pub origin: String,
    pub destination: String,
    pub orig_time_min: Option<String>,
    pub orig_time_date: Option<String>,
    pub dest_time_min: Option<String>,
    pub dest_time_date: Option<String>,
    pub trip_time: Option<String>,
    pub leg: Vec<RawLeg>,
}

/// One leg of an itinerary as the feed sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLeg {
    pub order: Option<String>,
    pub origin: String,
    pub destination: String,
    pub orig_time_min: Option<String>,
    pub dest_time_min: Option<String>,
    pub line: String,
    pub bikeflag: Option<String>,
    pub train_head_station: Option<String>,
    pub load: Option<String>,
    pub train_id: Option<String>,
}
