//! BART HTTP client.
//!
//! Provides async methods for querying the BART legacy JSON API. Handles
//! the API key, bounded request timeouts, the schedule feed's `@` marker
//! quirk, and conversion to domain types.

use std::sync::Arc;

use crate::domain::{Line, Route, Station, StationCode, TripOption, TripQuery};

use super::BartApi;
use super::convert::{convert_etd, convert_routes, convert_schedule, convert_stations};
use super::error::BartError;
use super::types::{EtdApiResponse, RoutesApiResponse, SchedApiResponse, StationsApiResponse};

/// Default base URL for the BART API.
const DEFAULT_BASE_URL: &str = "https://api.bart.gov/api";

/// Configuration for the BART client.
#[derive(Debug, Clone)]
pub struct BartConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Base URL for the API (defaults to production)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl BartConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Strip the schedule feed's stray `@` attribute markers from a response
/// body so it parses as plain JSON.
pub fn strip_schedule_markers(body: &str) -> String {
    body.replace('@', "")
}

/// BART API client.
///
/// Every request runs under the configured timeout; a hung upstream call
/// becomes a typed [`BartError::Timeout`] rather than hanging the enclosing
/// request.
#[derive(Debug, Clone)]
pub struct BartClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl BartClient {
    /// Create a new BART client with the given configuration.
    pub fn new(config: BartConfig) -> Result<Self, BartError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Issue a GET and return the response body, mapping non-success
    /// statuses to typed errors.
    async fn get_body(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<String, BartError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str()), ("json", "y")])
            .query(query)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BartError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        Ok(response.text().await?)
    }

    fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, BartError> {
        serde_json::from_str(body).map_err(|e| BartError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

impl BartApi for BartClient {
    async fn stations(&self) -> Result<Arc<Vec<Station>>, BartError> {
        let body = self.get_body("stn.aspx", &[("cmd", "stns")]).await?;
        let raw: StationsApiResponse = Self::parse(&body)?;
        Ok(Arc::new(convert_stations(raw)?))
    }

    async fn routes(&self) -> Result<Arc<Vec<Route>>, BartError> {
        let body = self.get_body("route.aspx", &[("cmd", "routes")]).await?;
        let raw: RoutesApiResponse = Self::parse(&body)?;
        Ok(Arc::new(convert_routes(raw)?))
    }

    async fn estimates(&self, station: StationCode) -> Result<Vec<Line>, BartError> {
        let body = self
            .get_body("etd.aspx", &[("cmd", "etd"), ("orig", station.as_str())])
            .await?;
        let raw: EtdApiResponse = Self::parse(&body)?;
        Ok(convert_etd(raw)?)
    }

    async fn depart_schedule(&self, trip: TripQuery) -> Result<Vec<TripOption>, BartError> {
        let body = self
            .get_body(
                "sched.aspx",
                &[
                    ("cmd", "depart"),
                    ("date", "now"),
                    ("orig", trip.origin.as_str()),
                    ("dest", trip.destination.as_str()),
                ],
            )
            .await?;

        // The schedule feed decorates attribute keys with @ markers
        let cleaned = strip_schedule_markers(&body);
        let raw: SchedApiResponse = Self::parse(&cleaned)?;
        Ok(convert_schedule(raw)?)
    }
}
