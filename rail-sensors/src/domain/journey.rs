//! Journey request and simplified itinerary types.
//!
//! An `Itinerary` is the provider-independent shape the planner adapter
//! maps into. Every field is optional because providers omit fields
//! rather than sending nulls.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::Crs;

/// Most itineraries kept per refresh.
pub const MAX_ITINERARIES: usize = 3;

/// A single journey-planning query.
///
/// Built once per poll and handed to the planner by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyRequest {
    origin: Crs,
    destination: Crs,
    via: Option<Crs>,
    avoid: Option<Crs>,
    when: DateTime<FixedOffset>,
    max_changes: u32,
    min_interchange_mins: u32,
}

impl JourneyRequest {
    pub fn new(
        origin: Crs,
        destination: Crs,
        via: Option<Crs>,
        avoid: Option<Crs>,
        when: DateTime<FixedOffset>,
        max_changes: u32,
        min_interchange_mins: u32,
    ) -> Self {
        Self {
            origin,
            destination,
            via,
            avoid,
            when,
            max_changes,
            min_interchange_mins,
        }
    }

    pub fn origin(&self) -> &Crs {
        &self.origin
    }

    pub fn destination(&self) -> &Crs {
        &self.destination
    }

    pub fn via(&self) -> Option<&Crs> {
        self.via.as_ref()
    }

    pub fn avoid(&self) -> Option<&Crs> {
        self.avoid.as_ref()
    }

    /// Requested departure time.
    pub fn when(&self) -> DateTime<FixedOffset> {
        self.when
    }

    pub fn max_changes(&self) -> u32 {
        self.max_changes
    }

    pub fn min_interchange_mins(&self) -> u32 {
        self.min_interchange_mins
    }
}

/// One leg of an itinerary (a train ride, a walk, a bus...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryLeg {
    pub mode: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub line: Option<String>,
    pub destination: Option<String>,
}

impl ItineraryLeg {
    /// Walking legs do not count towards changes.
    pub fn is_walk(&self) -> bool {
        matches!(
            self.mode.as_deref().map(str::to_ascii_lowercase).as_deref(),
            Some("foot" | "walk" | "walking")
        )
    }
}

/// A planned journey, simplified from provider output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub duration: Option<String>,
    pub changes: Option<u32>,
    pub legs: Vec<ItineraryLeg>,
}

impl Itinerary {
    /// `"dep → arr"` when both times are known, else whichever one exists.
    pub fn summary(&self) -> Option<String> {
        match (self.departure_time.as_deref(), self.arrival_time.as_deref()) {
            (Some(dep), Some(arr)) => Some(format!("{dep} → {arr}")),
            (Some(t), None) | (None, Some(t)) => Some(t.to_string()),
            (None, None) => None,
        }
    }
}

/// Keep at most `limit` itineraries, preserving provider order.
pub fn truncate_itineraries(mut itineraries: Vec<Itinerary>, limit: usize) -> Vec<Itinerary> {
    itineraries.truncate(limit);
    itineraries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn itin(dep: Option<&str>, arr: Option<&str>) -> Itinerary {
        Itinerary {
            departure_time: dep.map(String::from),
            arrival_time: arr.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn summary_both_times() {
        assert_eq!(
            itin(Some("10:00"), Some("10:45")).summary().as_deref(),
            Some("10:00 → 10:45")
        );
    }

    #[test]
    fn summary_single_time() {
        assert_eq!(itin(Some("10:00"), None).summary().as_deref(), Some("10:00"));
        assert_eq!(itin(None, Some("10:45")).summary().as_deref(), Some("10:45"));
        assert_eq!(itin(None, None).summary(), None);
    }

    #[test]
    fn walk_detection() {
        let walk = ItineraryLeg {
            mode: Some("Foot".into()),
            ..Default::default()
        };
        let train = ItineraryLeg {
            mode: Some("train".into()),
            ..Default::default()
        };
        assert!(walk.is_walk());
        assert!(!train.is_walk());
        assert!(!ItineraryLeg::default().is_walk());
    }

    #[test]
    fn request_accessors() {
        let when = DateTime::parse_from_rfc3339("2024-03-15T10:00:00+00:00").unwrap();
        let req = JourneyRequest::new(
            Crs::parse("KGX").unwrap(),
            Crs::parse("EDB").unwrap(),
            Some(Crs::parse("YRK").unwrap()),
            None,
            when,
            2,
            5,
        );
        assert_eq!(req.origin().as_str(), "KGX");
        assert_eq!(req.destination().as_str(), "EDB");
        assert_eq!(req.via().map(Crs::as_str), Some("YRK"));
        assert!(req.avoid().is_none());
        assert_eq!(req.when(), when);
        assert_eq!(req.max_changes(), 2);
        assert_eq!(req.min_interchange_mins(), 5);
    }
}
