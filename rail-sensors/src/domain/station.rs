//! Station code types and user-input normalization.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::known::KNOWN_STATIONS;

/// Error returned when parsing an invalid CRS code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CRS code: {reason}")]
pub struct InvalidCrs {
    reason: &'static str,
}

/// A valid 3-letter CRS (Computer Reservation System) station code.
///
/// CRS codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `Crs` value is valid by construction.
///
/// # Examples
///
/// ```
/// use rail_sensors::domain::Crs;
///
/// let kgx = Crs::parse("KGX").unwrap();
/// assert_eq!(kgx.as_str(), "KGX");
///
/// // Lowercase is rejected by `parse`, accepted by `parse_normalized`
/// assert!(Crs::parse("kgx").is_err());
/// assert_eq!(Crs::parse_normalized(" kgx ").unwrap(), kgx);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Crs([u8; 3]);

impl Crs {
    /// Parse a CRS code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCrs> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCrs {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCrs {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(Crs([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse user input: trims and upper-cases before validating.
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidCrs> {
        Self::parse(&normalize_code(s))
    }

    /// Returns the CRS code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or("???")
    }

    /// Whether this code appears in the built-in station list.
    pub fn is_known(&self) -> bool {
        is_known(self.as_str())
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.as_str())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Crs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Crs {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Crs::parse_normalized(&s).map_err(serde::de::Error::custom)
    }
}

/// Trim and upper-case a user-entered station code.
///
/// Never fails; codes that are still malformed afterwards are reported by
/// the departure-board probe.
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Normalize each element independently, dropping blank entries.
///
/// An empty list means "any destination" and stays empty.
pub fn normalize_codes<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    raw.iter()
        .map(|s| normalize_code(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect()
}

/// Normalize an optional code; blank input becomes `None`.
pub fn normalize_optional(raw: Option<&str>) -> Option<String> {
    raw.map(normalize_code).filter(|s| !s.is_empty())
}

/// Whether `code` is in the built-in station list. Case-sensitive.
pub fn is_known(code: &str) -> bool {
    KNOWN_STATIONS.binary_search(&code).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_crs() {
        assert!(Crs::parse("KGX").is_ok());
        assert!(Crs::parse("PAD").is_ok());
        assert!(Crs::parse("EUS").is_ok());
    }

    #[test]
    fn reject_lowercase() {
        assert!(Crs::parse("kgx").is_err());
        assert!(Crs::parse("KGx").is_err());
    }

    #[test]
    fn reject_wrong_length() {
        assert!(Crs::parse("").is_err());
        assert!(Crs::parse("KG").is_err());
        assert!(Crs::parse("KINGS").is_err());
    }

    #[test]
    fn parse_normalized_trims_and_uppercases() {
        assert_eq!(Crs::parse_normalized("  eus\t").unwrap().as_str(), "EUS");
        assert!(Crs::parse_normalized(" k g ").is_err());
    }

    #[test]
    fn normalize_code_examples() {
        assert_eq!(normalize_code(" kgx "), "KGX");
        assert_eq!(normalize_code("Stp"), "STP");
        assert_eq!(normalize_code(""), "");
    }

    #[test]
    fn empty_destinations_stay_empty() {
        let none: Vec<String> = Vec::new();
        assert!(normalize_codes(&none).is_empty());
        assert!(normalize_codes(&["", "   "]).is_empty());
        assert_eq!(normalize_codes(&[" eus", "ZFD "]), vec!["EUS", "ZFD"]);
    }

    #[test]
    fn optional_blank_becomes_none() {
        assert_eq!(normalize_optional(None), None);
        assert_eq!(normalize_optional(Some("  ")), None);
        assert_eq!(normalize_optional(Some("rdg")), Some("RDG".to_string()));
    }

    #[test]
    fn known_station_lookup() {
        assert!(is_known("KGX"));
        assert!(is_known("STP"));
        assert!(!is_known("kgx"));
        assert!(!is_known("QQQ"));
        assert!(Crs::parse("EUS").unwrap().is_known());
    }

    #[test]
    fn known_list_is_sorted_and_well_formed() {
        assert!(KNOWN_STATIONS.windows(2).all(|w| w[0] < w[1]));
        assert!(KNOWN_STATIONS.iter().all(|c| Crs::parse(c).is_ok()));
    }

    #[test]
    fn serde_accepts_lowercase() {
        let crs: Crs = serde_json::from_str("\" pad \"").unwrap();
        assert_eq!(crs.as_str(), "PAD");
        assert_eq!(serde_json::to_string(&crs).unwrap(), "\"PAD\"");
    }
}
