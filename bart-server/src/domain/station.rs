//! Station code and station types.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::geo::Coordinate;

/// Error returned when parsing an invalid station code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station code: {reason}")]
pub struct InvalidStationCode {
    reason: &'static str,
}

/// A valid BART station abbreviation.
///
/// Station codes are 1-4 uppercase ASCII letters or digits (current codes
/// are all four characters, e.g. `12TH`, `DALY`, `WCRK`). This type
/// guarantees that any `StationCode` value is valid by construction.
///
/// # Examples
///
/// ```
/// use bart_server::domain::StationCode;
///
/// let embr = StationCode::parse("EMBR").unwrap();
/// assert_eq!(embr.as_str(), "EMBR");
///
/// // Lowercase is rejected
/// assert!(StationCode::parse("embr").is_err());
///
/// // Wrong length is rejected
/// assert!(StationCode::parse("").is_err());
/// assert!(StationCode::parse("TOOLONG").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StationCode {
    bytes: [u8; 4],
    len: u8,
}

impl StationCode {
    /// Parse a station code from a string.
    ///
    /// The input must be 1-4 uppercase ASCII letters or digits.
    pub fn parse(s: &str) -> Result<Self, InvalidStationCode> {
        let raw = s.as_bytes();

        if raw.is_empty() || raw.len() > 4 {
            return Err(InvalidStationCode {
                reason: "must be 1-4 characters",
            });
        }

        let mut bytes = [0u8; 4];
        for (i, &b) in raw.iter().enumerate() {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidStationCode {
                    reason: "must be uppercase ASCII letters or digits",
                });
            }
            bytes[i] = b;
        }

        Ok(StationCode {
            bytes,
            len: raw.len() as u8,
        })
    }

    /// Parse a station code, trimming and uppercasing the input first.
    ///
    /// Useful at the web boundary where callers send codes in any case.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidStationCode> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the station code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters and digits are ever stored
        std::str::from_utf8(&self.bytes[..self.len as usize]).unwrap()
    }
}

impl fmt::Debug for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationCode({})", self.as_str())
    }
}

impl fmt::Display for StationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StationCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StationCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        StationCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A BART station from the reference data snapshot.
///
/// Reference attributes come from the upstream station list plus the static
/// entrance-coordinate table. Real-time departure lines are never stored
/// here; they are attached only in per-request response shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Station abbreviation, e.g. `12TH`.
    pub abbr: StationCode,

    /// Display name, e.g. "12th St. Oakland City Center".
    pub name: String,

    /// Latitude in degrees.
    #[serde(rename = "gtfs_latitude")]
    pub latitude: f64,

    /// Longitude in degrees.
    #[serde(rename = "gtfs_longitude")]
    pub longitude: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,

    /// Street-level entrance coordinates, where the static table has them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrances: Option<Vec<Coordinate>>,
}

impl Station {
    /// The station's platform coordinate.
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating valid station codes: 1-4 uppercase
    /// alphanumeric characters.
    fn valid_code_string() -> impl Strategy<Value = String> {
        proptest::string::string_regex("[A-Z0-9]{1,4}").unwrap()
    }

    proptest! {
        /// Roundtrip: parse then as_str returns the original
        #[test]
        fn roundtrip(s in valid_code_string()) {
            let code = StationCode::parse(&s).unwrap();
            prop_assert_eq!(code.as_str(), s.as_str());
        }

        /// Any valid code can be parsed
        #[test]
        fn valid_always_parses(s in valid_code_string()) {
            prop_assert!(StationCode::parse(&s).is_ok());
        }

        /// Lowercase letters are always rejected
        #[test]
        fn lowercase_rejected(s in "[a-z]{1,4}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }

        /// Over-long strings are always rejected
        #[test]
        fn too_long_rejected(s in "[A-Z0-9]{5,10}") {
            prop_assert!(StationCode::parse(&s).is_err());
        }
    }
}
