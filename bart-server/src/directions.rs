//! Trip enrichment.
//!
//! Resolves scheduled itineraries for origin/destination pairs and
//! annotates each leg with a head-sign station code looked up in the route
//! table. Trips are fetched concurrently and results preserve input order;
//! a failing trip is isolated into a per-trip outcome.

use futures::future::join_all;

use crate::bart::{BartApi, BartError};
use crate::domain::{RouteTable, TripOption, TripQuery};

/// One trip's itinerary options, or the reason they couldn't be fetched.
#[derive(Debug)]
pub struct TripDirections {
    pub query: TripQuery,
    pub options: Result<Vec<TripOption>, BartError>,
}

/// Annotate every leg with the head-sign code for its line.
///
/// Legs whose line identifier is not in the table keep an absent label;
/// that is expected for routes the reference snapshot doesn't know.
pub fn resolve_head_signs(options: &mut [TripOption], table: &RouteTable) {
    for option in options {
        for leg in &mut option.legs {
            leg.train_head_abbr = table.head_abbr_for(&leg.line);
        }
    }
}

/// Fetch and enrich itineraries for every trip query concurrently.
///
/// The route table is passed in explicitly; callers fetch it once through
/// the reference cache and share it across all trips in the batch.
pub async fn plan_trips<C: BartApi>(
    client: &C,
    table: &RouteTable,
    trips: Vec<TripQuery>,
) -> Vec<TripDirections> {
    let fetched = join_all(trips.iter().map(|t| client.depart_schedule(*t))).await;

    trips
        .into_iter()
        .zip(fetched)
        .map(|(query, mut options)| {
            match &mut options {
                Ok(options) => resolve_head_signs(options, table),
                Err(e) => {
                    tracing::warn!(
                        origin = %query.origin,
                        destination = %query.destination,
                        error = %e,
                        "trip schedule fetch failed"
                    );
                }
            }
            TripDirections { query, options }
        })
        .collect()
}
