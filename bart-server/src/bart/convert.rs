//! Conversion from BART API DTOs to domain types.
//!
//! This module handles the transformation of raw feed responses into our
//! validated domain types: string coordinates become floats, composite route
//! codes are split into origin/head codes, minutes fields are normalized,
//! and surveyed entrance coordinates are attached.

use crate::domain::{
    Direction, Estimate, Line, Route, Station, StationCode, TripLeg, TripOption, parse_minutes,
};
use crate::entrances::entrances_for;

use super::types::{
    EtdApiResponse, RawLeg, RawTrip, RoutesApiResponse, SchedApiResponse, StationsApiResponse,
};

/// Error during DTO to domain conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    /// Failed to parse a station code
    #[error("invalid station code: {0:?}")]
    InvalidStationCode(String),

    /// A coordinate field did not parse as a float
    #[error("invalid coordinate {field}: {value:?}")]
    InvalidCoordinate {
        field: &'static str,
        value: String,
    },

    /// A composite route code had no `-` delimiter
    #[error("invalid composite route code: {0:?}")]
    InvalidRouteAbbr(String),

    /// A route number did not parse as an integer
    #[error("invalid route number: {0:?}")]
    InvalidRouteNumber(String),

    /// A minutes field was neither "Leaving" nor an integer
    #[error("invalid minutes value: {0:?}")]
    InvalidMinutes(String),

    /// Missing required field
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

fn parse_code(raw: &str) -> Result<StationCode, ConversionError> {
    StationCode::parse(raw).map_err(|_| ConversionError::InvalidStationCode(raw.to_string()))
}

fn parse_coord(field: &'static str, value: &str) -> Result<f64, ConversionError> {
    value
        .parse::<f64>()
        .map_err(|_| ConversionError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

/// Convert a station list response to domain stations.
///
/// Attaches surveyed entrance coordinates where the static table has an
/// entry for the station code.
pub fn convert_stations(raw: StationsApiResponse) -> Result<Vec<Station>, ConversionError> {
    raw.root
        .stations
        .station
        .into_iter()
        .map(|s| {
            let abbr = parse_code(&s.abbr)?;
            Ok(Station {
                abbr,
                name: s.name,
                latitude: parse_coord("gtfs_latitude", &s.gtfs_latitude)?,
                longitude: parse_coord("gtfs_longitude", &s.gtfs_longitude)?,
                address: s.address,
                city: s.city,
                county: s.county,
                state: s.state,
                zipcode: s.zipcode,
                entrances: entrances_for(abbr.as_str()),
            })
        })
        .collect()
}

/// Convert a route list response to domain routes.
///
/// The composite `abbr` code is split on its first `-` into origin and head
/// codes; the directionality label is derived lexicographically from them.
pub fn convert_routes(raw: RoutesApiResponse) -> Result<Vec<Route>, ConversionError> {
    raw.root
        .routes
        .route
        .into_iter()
        .map(|r| {
            let (origin, head) = r
                .abbr
                .split_once('-')
                .ok_or_else(|| ConversionError::InvalidRouteAbbr(r.abbr.clone()))?;
            let train_origin_abbr = parse_code(origin)?;
            let train_head_abbr = parse_code(head)?;
            let number = r
                .number
                .parse::<u32>()
                .map_err(|_| ConversionError::InvalidRouteNumber(r.number.clone()))?;

            Ok(Route {
                name: r.name,
                abbr: r.abbr,
                train_origin_abbr,
                train_head_abbr,
                route_id: r.route_id,
                number,
                hexcolor: r.hexcolor,
                color: r.color,
                direction: Direction::from_endpoints(train_origin_abbr, train_head_abbr),
            })
        })
        .collect()
}

/// Convert a real-time estimates response into departure lines.
///
/// The feed nests the board under `root.station[0].etd`; a response without
/// that structure (unknown station, or a board with no destination groups)
/// is a missing-field error, matching how the upstream shapes failure.
pub fn convert_etd(raw: EtdApiResponse) -> Result<Vec<Line>, ConversionError> {
    let station = raw
        .root
        .station
        .into_iter()
        .next()
        .ok_or(ConversionError::MissingField("station"))?;

    let etds = station.etd.ok_or(ConversionError::MissingField("etd"))?;

    etds.into_iter()
        .map(|e| {
            let estimates = e
                .estimate
                .into_iter()
                .map(|est| {
                    let minutes = parse_minutes(&est.minutes)
                        .map_err(|e| ConversionError::InvalidMinutes(e.0))?;
                    Ok(Estimate {
                        direction: est.direction,
                        hexcolor: est.hexcolor,
                        length: est.length,
                        minutes,
                        platform: est.platform,
                    })
                })
                .collect::<Result<Vec<_>, ConversionError>>()?;

            Ok(Line {
                abbreviation: e.abbreviation,
                destination: e.destination,
                estimates,
            })
        })
        .collect()
}

/// Convert a schedule depart response into itinerary options.
///
/// Legs keep upstream order. Fares are suppressed here, not at the web
/// layer, so every downstream consumer sees the same shape.
pub fn convert_schedule(raw: SchedApiResponse) -> Result<Vec<TripOption>, ConversionError> {
    raw.root
        .schedule
        .request
        .trip
        .into_iter()
        .map(convert_trip)
        .collect()
}

fn convert_trip(raw: RawTrip) -> Result<TripOption, ConversionError> {
    Ok(TripOption {
        origin: parse_code(&raw.origin)?,
        destination: parse_code(&raw.destination)?,
        orig_time_min: raw.orig_time_min,
        orig_time_date: raw.orig_time_date,
        dest_time_min: raw.dest_time_min,
        dest_time_date: raw.dest_time_date,
        trip_time: raw.trip_time,
        fares: None,
        legs: raw
            .leg
            .into_iter()
            .map(convert_leg)
            .collect::<Result<Vec<_>, _>>()?,
    })
}

fn convert_leg(raw: RawLeg) -> Result<TripLeg, ConversionError> {
    Ok(TripLeg {
        order: raw.order,
        origin: parse_code(&raw.origin)?,
        destination: parse_code(&raw.destination)?,
        orig_time_min: raw.orig_time_min,
        dest_time_min: raw.dest_time_min,
        line: raw.line,
        bikeflag: raw.bikeflag,
        train_head_station: raw.train_head_station,
        load: raw.load,
        train_id: raw.train_id,
        train_head_abbr: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations_response(json: &str) -> StationsApiResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn stations_parse_coordinates_and_attach_entrances() {
        let raw = stations_response(
            r#"{
            "root": {"stations": {"station": [
                {
                    "name": "12th St. Oakland City Center",
                    "abbr": "12TH",
                    "gtfs_latitude": "37.803768",
                    "gtfs_longitude": "-122.271450",
                    "address": "1245 Broadway",
                    "city": "Oakland",
                    "county": "alameda",
                    "state": "CA",
                    "zipcode": "94612"
                },
                {
                    "name": "Daly City",
                    "abbr": "DALY",
                    "gtfs_latitude": "37.70612055",
                    "gtfs_longitude": "-122.4690807",
                    "address": "500 John Daly Blvd.",
                    "city": "Daly City",
                    "county": "sanmateo",
                    "state": "CA",
                    "zipcode": "94014"
                }
            ]}}
        }"#,
        );

        let stations = convert_stations(raw).unwrap();
        assert_eq!(stations.len(), 2);

        let twelfth = &stations[0];
        assert_eq!(twelfth.abbr.as_str(), "12TH");
        assert_eq!(twelfth.latitude, 37.803768);
        assert_eq!(twelfth.longitude, -122.27145);
        assert_eq!(twelfth.entrances.as_ref().unwrap().len(), 7);

        // DALY is not in the surveyed entrance table
        assert!(stations[1].entrances.is_none());
    }

    #[test]
    fn station_with_bad_coordinate_is_an_error() {
        let raw = stations_response(
            r#"{
            "root": {"stations": {"station": [
                {
                    "name": "Broken",
                    "abbr": "BRKN",
                    "gtfs_latitude": "not-a-number",
                    "gtfs_longitude": "-122.0"
                }
            ]}}
        }"#,
        );

        let err = convert_stations(raw).unwrap_err();
        assert!(matches!(
            err,
            ConversionError::InvalidCoordinate {
                field: "gtfs_latitude",
                ..
            }
        ));
    }

    #[test]
    fn routes_split_composite_code_and_derive_direction() {
        let raw: RoutesApiResponse = serde_json::from_str(
            r##"{
            "root": {"routes": {"route": [
                {
                    "name": "Dublin/Pleasanton to Daly City",
                    "abbr": "DUBL-DALY",
                    "routeID": "ROUTE 11",
                    "number": "11",
                    "hexcolor": "#0099CC",
                    "color": "BLUE"
                },
                {
                    "name": "Daly City to Dublin/Pleasanton",
                    "abbr": "DALY-DUBL",
                    "routeID": "ROUTE 12",
                    "number": "12",
                    "hexcolor": "#0099CC",
                    "color": "BLUE"
                }
            ]}}
        }"##,
        )
        .unwrap();

        let routes = convert_routes(raw).unwrap();
        assert_eq!(routes[0].train_origin_abbr.as_str(), "DUBL");
        assert_eq!(routes[0].train_head_abbr.as_str(), "DALY");
        assert_eq!(routes[0].number, 11);
        assert_eq!(routes[0].direction, Direction::South);
        assert_eq!(routes[1].direction, Direction::North);
    }

    #[test]
    fn route_without_delimiter_is_an_error() {
        let raw: RoutesApiResponse = serde_json::from_str(
            r##"{
            "root": {"routes": {"route": [
                {
                    "name": "Broken",
                    "abbr": "NODELIM",
                    "routeID": "ROUTE 99",
                    "number": "99",
                    "hexcolor": "#000000",
                    "color": "BLACK"
                }
            ]}}
        }"##,
        )
        .unwrap();

        assert_eq!(
            convert_routes(raw).unwrap_err(),
            ConversionError::InvalidRouteAbbr("NODELIM".to_string())
        );
    }

    #[test]
    fn etd_normalizes_minutes() {
        let raw: EtdApiResponse = serde_json::from_str(
            r##"{
            "root": {"station": [{"etd": [
                {
                    "destination": "Daly City",
                    "abbreviation": "DALY",
                    "estimate": [
                        {"minutes": "Leaving", "platform": "2", "direction": "South", "length": "10", "hexcolor": "#0099CC"},
                        {"minutes": "9", "platform": "2", "direction": "South", "length": "9", "hexcolor": "#0099CC"}
                    ]
                }
            ]}]}
        }"##,
        )
        .unwrap();

        let lines = convert_etd(raw).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].abbreviation, "DALY");
        assert_eq!(lines[0].estimates[0].minutes, 0);
        assert_eq!(lines[0].estimates[1].minutes, 9);
    }

    #[test]
    fn etd_bad_minutes_is_an_error() {
        let raw: EtdApiResponse = serde_json::from_str(
            r##"{
            "root": {"station": [{"etd": [
                {
                    "destination": "Daly City",
                    "abbreviation": "DALY",
                    "estimate": [
                        {"minutes": "soon", "platform": "2", "direction": "South", "length": "10", "hexcolor": "#0099CC"}
                    ]
                }
            ]}]}
        }"##,
        )
        .unwrap();

        assert_eq!(
            convert_etd(raw).unwrap_err(),
            ConversionError::InvalidMinutes("soon".to_string())
        );
    }

    #[test]
    fn etd_missing_station_or_board_is_an_error() {
        let raw: EtdApiResponse = serde_json::from_str(r#"{"root": {"station": []}}"#).unwrap();
        assert_eq!(
            convert_etd(raw).unwrap_err(),
            ConversionError::MissingField("station")
        );

        let raw: EtdApiResponse = serde_json::from_str(r#"{"root": {"station": [{}]}}"#).unwrap();
        assert_eq!(
            convert_etd(raw).unwrap_err(),
            ConversionError::MissingField("etd")
        );
    }

    #[test]
    fn schedule_preserves_leg_order_and_suppresses_fares() {
        let raw: SchedApiResponse = serde_json::from_str(
            r#"{
            "root": {"schedule": {"request": {"trip": [
                {
                    "origin": "DUBL",
                    "destination": "DALY",
                    "leg": [
                        {"order": "1", "origin": "DUBL", "destination": "BAYF", "line": "ROUTE 11"},
                        {"order": "2", "origin": "BAYF", "destination": "DALY", "line": "ROUTE 5"}
                    ]
                }
            ]}}}
        }"#,
        )
        .unwrap();

        let options = convert_schedule(raw).unwrap();
        assert_eq!(options.len(), 1);
        assert!(options[0].fares.is_none());
        let legs = &options[0].legs;
        assert_eq!(legs[0].order.as_deref(), Some("1"));
        assert_eq!(legs[0].line, "ROUTE 11");
        assert_eq!(legs[1].order.as_deref(), Some("2"));
        assert_eq!(legs[1].line, "ROUTE 5");
        // Head signs are not resolved at conversion time
        assert!(legs[0].train_head_abbr.is_none());
    }
}
