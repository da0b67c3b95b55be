//! Route types and the head-sign lookup table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::station::StationCode;

/// Coarse directionality label for a route.
///
/// Derived lexicographically from the origin vs. destination codes. This is
/// a labelling heuristic inherited from the upstream data, not a geographic
/// fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// Label a route by comparing its endpoint codes.
    pub fn from_endpoints(origin: StationCode, head: StationCode) -> Self {
        if origin < head {
            Direction::North
        } else {
            Direction::South
        }
    }
}

/// A BART route from the reference data snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Display name, e.g. "Dublin/Pleasanton to Daly City".
    pub name: String,

    /// Composite code, e.g. `DUBL-DALY`.
    pub abbr: String,

    /// Origin station code, split from the composite code.
    #[serde(rename = "trainOriginAbbr")]
    pub train_origin_abbr: StationCode,

    /// Head (destination) station code, split from the composite code.
    #[serde(rename = "trainHeadAbbr")]
    pub train_head_abbr: StationCode,

    /// Route identifier as used by the schedule feed, e.g. `ROUTE 11`.
    #[serde(rename = "routeID")]
    pub route_id: String,

    /// Numeric route designator.
    pub number: u32,

    pub hexcolor: String,

    pub color: String,

    pub direction: Direction,
}

/// Lookup table from schedule-feed route identifiers to head-sign codes.
///
/// Built from a route snapshot and passed explicitly wherever head-sign
/// resolution happens, so the lookup is testable without any network or
/// shared mutable state.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    heads: HashMap<String, StationCode>,
}

impl RouteTable {
    /// Build a table from a route snapshot.
    pub fn from_routes(routes: &[Route]) -> Self {
        let heads = routes
            .iter()
            .map(|r| (r.route_id.clone(), r.train_head_abbr))
            .collect();
        Self { heads }
    }

    /// Resolve the head-sign code for a schedule-feed line identifier.
    ///
    /// Returns `None` when the identifier is unknown; callers treat a
    /// missing label as absent, not as an error.
    pub fn head_abbr_for(&self, line_id: &str) -> Option<StationCode> {
        self.heads.get(line_id).copied()
    }

    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}
