//! BART proxy server.
//!
//! A small JSON edge service over the public BART API: nearest stations
//! with live departure boards, scheduled trip itineraries, the station
//! name table, and lightweight usage analytics.

pub mod analytics;
pub mod bart;
pub mod cache;
pub mod departures;
pub mod directions;
pub mod domain;
pub mod entrances;
pub mod proximity;
pub mod web;
