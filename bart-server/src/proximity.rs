//! Nearest-station ranking.

use crate::bart::{BartApi, BartError};
use crate::domain::{Coordinate, Station, distance};

/// How many stations a `/bart` query returns by default.
pub const DEFAULT_LIMIT: usize = 2;

/// A station paired with its distance to a query point.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedStation {
    pub station: Station,
    pub distance: f64,
}

/// Rank stations by distance to a point, ascending, and take the first
/// `limit`.
///
/// The sort is stable, so stations at equal distance keep their upstream
/// order. Returns `min(limit, available)` entries; an empty input yields an
/// empty output.
pub fn rank(stations: &[Station], point: Coordinate, limit: usize) -> Vec<RankedStation> {
    let mut ranked: Vec<RankedStation> = stations
        .iter()
        .map(|s| RankedStation {
            station: s.clone(),
            distance: distance(s.coordinate(), point),
        })
        .collect();

    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked.truncate(limit);
    ranked
}

/// Fetch the station snapshot and rank it against a query point.
///
/// Callers hand in the cache-wrapped client, so the snapshot fetch only
/// touches upstream when the cache has expired.
pub async fn closest_stations<C: BartApi>(
    client: &C,
    point: Coordinate,
    limit: usize,
) -> Result<Vec<RankedStation>, BartError> {
    let stations = client.stations().await?;
    Ok(rank(&stations, point, limit))
}
