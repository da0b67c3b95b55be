//! BART legacy API client.
//!
//! This module provides an HTTP client for the public BART JSON API, which
//! serves station and route reference data, real-time departure estimates,
//! and scheduled itineraries.
//!
//! Key characteristics of the feed:
//! - Everything is wrapped in a `root` object and numeric fields arrive as
//!   strings
//! - A train at the platform reports its minutes as the literal `"Leaving"`
//! - The schedule endpoint body carries stray `@` markers that must be
//!   stripped before parsing

use std::future::Future;
use std::sync::Arc;

use crate::domain::{Line, Route, Station, StationCode, TripOption, TripQuery};

mod client;
mod convert;
mod error;
mod mock;
mod types;

pub use client::{BartClient, BartConfig, strip_schedule_markers};
pub use convert::{
    ConversionError, convert_etd, convert_routes, convert_schedule, convert_stations,
};
pub use error::BartError;
pub use mock::MockBartClient;
pub use types::{
    EtdApiResponse, RawEstimate, RawEtd, RawLeg, RawRoute, RawStation, RawTrip,
    RoutesApiResponse, SchedApiResponse, StationsApiResponse,
};

/// The upstream API surface the rest of the crate depends on.
///
/// Implemented by [`BartClient`] for production and [`MockBartClient`] for
/// tests and offline development. Futures are `Send` so implementations can
/// be driven from any handler.
pub trait BartApi: Send + Sync {
    /// Fetch the full station reference list.
    fn stations(&self) -> impl Future<Output = Result<Arc<Vec<Station>>, BartError>> + Send;

    /// Fetch the full route reference list.
    fn routes(&self) -> impl Future<Output = Result<Arc<Vec<Route>>, BartError>> + Send;

    /// Fetch the real-time departure board for one station.
    fn estimates(
        &self,
        station: StationCode,
    ) -> impl Future<Output = Result<Vec<Line>, BartError>> + Send;

    /// Fetch scheduled itineraries for an origin/destination pair,
    /// departing now.
    fn depart_schedule(
        &self,
        trip: TripQuery,
    ) -> impl Future<Output = Result<Vec<TripOption>, BartError>> + Send;
}
