//! Departure lines and real-time estimates.

use serde::{Deserialize, Serialize};

/// Error returned when an upstream minutes field cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid minutes value: {0:?}")]
pub struct InvalidMinutes(pub String);

/// Normalize an upstream minutes-until-arrival field.
///
/// The estimates feed sends minutes as a string; a train at the platform is
/// the literal `"Leaving"` rather than `"0"`. Anything else must parse as a
/// base-10 integer. Parse failures are an error, never silently coerced.
pub fn parse_minutes(raw: &str) -> Result<u32, InvalidMinutes> {
    if raw == "Leaving" {
        return Ok(0);
    }
    raw.parse::<u32>()
        .map_err(|_| InvalidMinutes(raw.to_string()))
}

/// One real-time arrival estimate for a train.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub direction: String,

    /// Line color as a hex string, e.g. `#0099CC`.
    pub hexcolor: String,

    /// Train length in cars, relayed as the feed sends it.
    pub length: String,

    /// Minutes until arrival; `"Leaving"` upstream is normalized to 0.
    pub minutes: u32,

    pub platform: String,
}

/// A departure listing for one destination at one station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Destination station abbreviation as the feed reports it.
    pub abbreviation: String,

    /// Destination display name.
    pub destination: String,

    /// Estimates in upstream order (soonest first).
    pub estimates: Vec<Estimate>,
}
