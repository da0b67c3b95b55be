//! Domain types for the BART proxy.
//!
//! This module contains the core domain model types that represent
//! validated transit data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod geo;
mod line;
mod route;
mod station;
mod trip;

pub use geo::{Coordinate, distance};
pub use line::{Estimate, InvalidMinutes, Line, parse_minutes};
pub use route::{Direction, Route, RouteTable};
pub use station::{InvalidStationCode, Station, StationCode};
pub use trip::{TripLeg, TripOption, TripQuery};
