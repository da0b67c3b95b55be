//! Departure enrichment.
//!
//! Attaches real-time departure lines to ranked stations. Boards are
//! fetched concurrently, one request per station, and results are collected
//! in input order regardless of completion order. A failing station is
//! isolated into a per-station outcome instead of failing the whole batch.

use futures::future::join_all;

use crate::bart::{BartApi, BartError};
use crate::domain::{Line, Station};
use crate::proximity::RankedStation;

/// One station's departure board, or the reason it couldn't be fetched.
#[derive(Debug)]
pub struct StationDepartures {
    pub station: Station,
    pub distance: f64,
    pub lines: Result<Vec<Line>, BartError>,
}

/// Fetch departure boards for every ranked station concurrently.
///
/// Wall-clock latency is bounded by the slowest single board fetch, not
/// their sum. Output order matches input order.
pub async fn fetch_departures<C: BartApi>(
    client: &C,
    ranked: Vec<RankedStation>,
) -> Vec<StationDepartures> {
    let boards = join_all(ranked.iter().map(|r| client.estimates(r.station.abbr))).await;

    ranked
        .into_iter()
        .zip(boards)
        .map(|(r, lines)| {
            if let Err(e) = &lines {
                tracing::warn!(station = %r.station.abbr, error = %e, "departure board fetch failed");
            }
            StationDepartures {
                station: r.station,
                distance: r.distance,
                lines,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bart::MockBartClient;
    use crate::domain::StationCode;

    fn ranked(abbr: &str, dist: f64) -> RankedStation {
        RankedStation {
            station: Station {
                abbr: StationCode::parse(abbr).unwrap(),
                name: abbr.to_string(),
                latitude: 37.8,
                longitude: -122.3,
                address: None,
                city: None,
                county: None,
                state: None,
                zipcode: None,
                entrances: None,
            },
            distance: dist,
        }
    }

    fn board(dest: &str) -> String {
        format!(
            r##"{{
            "root": {{"station": [{{"etd": [
                {{
                    "destination": "{dest}",
                    "abbreviation": "{dest}",
                    "estimate": [
                        {{"minutes": "Leaving", "platform": "2", "direction": "South", "length": "10", "hexcolor": "#0099CC"}}
                    ]
                }}
            ]}}]}}
        }}"##
        )
    }

    #[tokio::test]
    async fn boards_come_back_in_input_order() {
        let mock = MockBartClient::new();
        mock.set_board(StationCode::parse("12TH").unwrap(), &board("DALY"))
            .await
            .unwrap();
        mock.set_board(StationCode::parse("19TH").unwrap(), &board("RICH"))
            .await
            .unwrap();

        let results =
            fetch_departures(&mock, vec![ranked("12TH", 0.0), ranked("19TH", 0.005)]).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].station.abbr.as_str(), "12TH");
        assert_eq!(results[0].lines.as_ref().unwrap()[0].abbreviation, "DALY");
        assert_eq!(results[1].station.abbr.as_str(), "19TH");
        assert_eq!(results[1].lines.as_ref().unwrap()[0].abbreviation, "RICH");
    }

    #[tokio::test]
    async fn one_failing_station_does_not_poison_the_batch() {
        let mock = MockBartClient::new();
        // Only 12TH has a board; 19TH will 404
        mock.set_board(StationCode::parse("12TH").unwrap(), &board("DALY"))
            .await
            .unwrap();

        let results =
            fetch_departures(&mock, vec![ranked("12TH", 0.0), ranked("19TH", 0.005)]).await;

        assert!(results[0].lines.is_ok());
        assert!(results[1].lines.is_err());
        // The failing entry still carries its station and distance
        assert_eq!(results[1].station.abbr.as_str(), "19TH");
        assert_eq!(results[1].distance, 0.005);
    }

    #[tokio::test]
    async fn empty_input_is_fine() {
        let mock = MockBartClient::new();
        assert!(fetch_departures(&mock, vec![]).await.is_empty());
    }

    #[tokio::test]
    async fn normalized_minutes_flow_through() {
        let mock = MockBartClient::new();
        mock.set_board(StationCode::parse("12TH").unwrap(), &board("DALY"))
            .await
            .unwrap();

        let results = fetch_departures(&mock, vec![ranked("12TH", 0.0)]).await;
        let lines = results[0].lines.as_ref().unwrap();
        // "Leaving" in the canned board became 0
        assert_eq!(lines[0].estimates[0].minutes, 0);
    }
}
