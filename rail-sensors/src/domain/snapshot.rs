//! Published journey snapshots.
//!
//! A snapshot is replaced wholesale on every poll. A snapshot carrying an
//! error marker never carries itineraries; the constructors are the only
//! way to build one, so that holds for every value of this type.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use super::{Crs, Itinerary};

/// Why a poll produced no itineraries without calling the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotError {
    /// Origin or destination is not configured.
    #[serde(rename = "origin_or_destination_missing")]
    MissingRoute,
    /// Planner app id or key is not configured.
    #[serde(rename = "transportapi_credentials_missing")]
    MissingCredentials,
}

impl SnapshotError {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnapshotError::MissingRoute => "origin_or_destination_missing",
            SnapshotError::MissingCredentials => "transportapi_credentials_missing",
        }
    }
}

/// The latest result of a coordinator poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    origin: Option<Crs>,
    destination: Option<Crs>,
    via: Option<Crs>,
    when: DateTime<FixedOffset>,
    itineraries: Vec<Itinerary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<SnapshotError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    raw: Option<serde_json::Value>,
}

impl Snapshot {
    /// A successful poll.
    pub fn planned(
        origin: Crs,
        destination: Crs,
        via: Option<Crs>,
        when: DateTime<FixedOffset>,
        itineraries: Vec<Itinerary>,
        raw: Option<serde_json::Value>,
    ) -> Self {
        Self {
            origin: Some(origin),
            destination: Some(destination),
            via,
            when,
            itineraries,
            error: None,
            raw,
        }
    }

    /// A poll that stopped before calling the planner.
    pub fn failed(
        error: SnapshotError,
        origin: Option<Crs>,
        destination: Option<Crs>,
        via: Option<Crs>,
        when: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            origin,
            destination,
            via,
            when,
            itineraries: Vec::new(),
            error: Some(error),
            raw: None,
        }
    }

    pub fn origin(&self) -> Option<&Crs> {
        self.origin.as_ref()
    }

    pub fn destination(&self) -> Option<&Crs> {
        self.destination.as_ref()
    }

    pub fn via(&self) -> Option<&Crs> {
        self.via.as_ref()
    }

    /// When the query was issued.
    pub fn when(&self) -> DateTime<FixedOffset> {
        self.when
    }

    /// Itineraries, best first as ranked by the provider.
    pub fn itineraries(&self) -> &[Itinerary] {
        &self.itineraries
    }

    pub fn error(&self) -> Option<SnapshotError> {
        self.error
    }

    /// Provider payload, kept only when debug capture is on.
    pub fn raw(&self) -> Option<&serde_json::Value> {
        self.raw.as_ref()
    }
}
