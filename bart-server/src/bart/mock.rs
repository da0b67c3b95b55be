//! Mock BART client for testing without API access.
//!
//! Serves canned wire-format responses as if they were live API responses,
//! either loaded from a directory of JSON files or inserted directly.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Line, Route, Station, StationCode, TripOption, TripQuery};

use super::BartApi;
use super::client::strip_schedule_markers;
use super::convert::{convert_etd, convert_routes, convert_schedule, convert_stations};
use super::error::BartError;
use super::types::{EtdApiResponse, RoutesApiResponse, SchedApiResponse, StationsApiResponse};

#[derive(Default)]
struct MockData {
    stations: Option<StationsApiResponse>,
    routes: Option<RoutesApiResponse>,
    boards: HashMap<StationCode, EtdApiResponse>,
    schedules: HashMap<(StationCode, StationCode), SchedApiResponse>,
}

/// Mock BART client that serves canned wire responses.
///
/// Useful for development and testing without real API access. Responses
/// are stored in wire format and run through the same conversion code as
/// live responses.
#[derive(Clone, Default)]
pub struct MockBartClient {
    data: Arc<RwLock<MockData>>,
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, BartError> {
    serde_json::from_str(json).map_err(|e| BartError::Json {
        message: e.to_string(),
        body: Some(json.chars().take(500).collect()),
    })
}

impl MockBartClient {
    /// Create an empty mock client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock client by loading JSON files from a directory.
    ///
    /// Expects `stations.json`, `routes.json`, `etd_{CODE}.json` per
    /// station board, and `sched_{ORIG}_{DEST}.json` per trip pair.
    pub fn from_dir(data_dir: impl AsRef<Path>) -> Result<Self, BartError> {
        let data_dir = data_dir.as_ref();
        let mut data = MockData::default();

        let entries = std::fs::read_dir(data_dir).map_err(|e| BartError::Api {
            status: 0,
            message: format!("failed to read mock data directory: {e}"),
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| BartError::Api {
                status: 0,
                message: format!("failed to read directory entry: {e}"),
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| BartError::Api {
                    status: 0,
                    message: format!("invalid filename: {path:?}"),
                })?;

            let json = std::fs::read_to_string(&path).map_err(|e| BartError::Api {
                status: 0,
                message: format!("failed to read {path:?}: {e}"),
            })?;

            match stem {
                "stations" => data.stations = Some(parse_json(&json)?),
                "routes" => data.routes = Some(parse_json(&json)?),
                other => {
                    if let Some(code) = other.strip_prefix("etd_") {
                        let code = StationCode::parse(code).map_err(|e| BartError::Api {
                            status: 0,
                            message: format!("invalid station code in filename {path:?}: {e}"),
                        })?;
                        data.boards.insert(code, parse_json(&json)?);
                    } else if let Some(pair) = other.strip_prefix("sched_") {
                        let (orig, dest) =
                            pair.split_once('_').ok_or_else(|| BartError::Api {
                                status: 0,
                                message: format!("invalid schedule filename: {path:?}"),
                            })?;
                        let key = (
                            StationCode::parse(orig).map_err(|e| BartError::Api {
                                status: 0,
                                message: format!("invalid origin in filename {path:?}: {e}"),
                            })?,
                            StationCode::parse(dest).map_err(|e| BartError::Api {
                                status: 0,
                                message: format!("invalid destination in filename {path:?}: {e}"),
                            })?,
                        );
                        data.schedules
                            .insert(key, parse_json(&strip_schedule_markers(&json))?);
                    }
                    // Unrecognized files are ignored
                }
            }
        }

        Ok(Self {
            data: Arc::new(RwLock::new(data)),
        })
    }

    /// Install a canned station list response.
    pub async fn set_stations(&self, json: &str) -> Result<(), BartError> {
        self.data.write().await.stations = Some(parse_json(json)?);
        Ok(())
    }

    /// Install a canned route list response.
    pub async fn set_routes(&self, json: &str) -> Result<(), BartError> {
        self.data.write().await.routes = Some(parse_json(json)?);
        Ok(())
    }

    /// Install a canned departure board for one station.
    pub async fn set_board(&self, station: StationCode, json: &str) -> Result<(), BartError> {
        self.data.write().await.boards.insert(station, parse_json(json)?);
        Ok(())
    }

    /// Install a canned schedule response for one trip pair.
    ///
    /// Accepts bodies with the feed's `@` markers and strips them, matching
    /// what the real client does.
    pub async fn set_schedule(
        &self,
        origin: StationCode,
        destination: StationCode,
        json: &str,
    ) -> Result<(), BartError> {
        self.data
            .write()
            .await
            .schedules
            .insert((origin, destination), parse_json(&strip_schedule_markers(json))?);
        Ok(())
    }
}

impl BartApi for MockBartClient {
    async fn stations(&self) -> Result<Arc<Vec<Station>>, BartError> {
        let data = self.data.read().await;
        let raw = data.stations.clone().ok_or_else(|| BartError::Api {
            status: 404,
            message: "no mock station data installed".to_string(),
        })?;
        Ok(Arc::new(convert_stations(raw)?))
    }

    async fn routes(&self) -> Result<Arc<Vec<Route>>, BartError> {
        let data = self.data.read().await;
        let raw = data.routes.clone().ok_or_else(|| BartError::Api {
            status: 404,
            message: "no mock route data installed".to_string(),
        })?;
        Ok(Arc::new(convert_routes(raw)?))
    }

    async fn estimates(&self, station: StationCode) -> Result<Vec<Line>, BartError> {
        let data = self.data.read().await;
        let raw = data.boards.get(&station).cloned().ok_or_else(|| BartError::Api {
            status: 404,
            message: format!("no mock board for station {station}"),
        })?;
        Ok(convert_etd(raw)?)
    }

    async fn depart_schedule(&self, trip: TripQuery) -> Result<Vec<TripOption>, BartError> {
        let data = self.data.read().await;
        let raw = data
            .schedules
            .get(&(trip.origin, trip.destination))
            .cloned()
            .ok_or_else(|| BartError::Api {
                status: 404,
                message: format!(
                    "no mock schedule for {}-{}",
                    trip.origin, trip.destination
                ),
            })?;
        Ok(convert_schedule(raw)?)
    }
}
