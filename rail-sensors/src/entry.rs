//! Config entries: what a user submits and what gets stored.
//!
//! `UserInput` is the raw form. Once the probe accepts it, it becomes an
//! `EntryConfig` with parsed station codes, wrapped in a `ConfigEntry`
//! that carries the id and title.

use serde::{Deserialize, Serialize};

use crate::domain::{Crs, InvalidCrs, normalize_code, normalize_codes, normalize_optional};
use crate::planner::{PlannerCredentials, PlannerProvider};

pub const DEFAULT_MAX_CHANGES: u32 = 2;
pub const DEFAULT_MIN_INTERCHANGE_MINS: u32 = 5;

fn default_max_changes() -> u32 {
    DEFAULT_MAX_CHANGES
}

fn default_min_interchange_mins() -> u32 {
    DEFAULT_MIN_INTERCHANGE_MINS
}

/// The config form as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub api_token: String,
    pub station: String,
    #[serde(default)]
    pub destinations: Vec<String>,
    #[serde(default)]
    pub via: Option<String>,
    #[serde(default)]
    pub avoid: Option<String>,
    #[serde(default = "default_max_changes")]
    pub max_changes: u32,
    #[serde(default = "default_min_interchange_mins")]
    pub min_interchange_mins: u32,
    #[serde(default)]
    pub planner_provider: PlannerProvider,
    #[serde(default)]
    pub transportapi_app_id: Option<String>,
    #[serde(default)]
    pub transportapi_app_key: Option<String>,
}

impl UserInput {
    /// Trim and upper-case every station code field.
    pub fn normalize(&mut self) {
        self.station = normalize_code(&self.station);
        self.destinations = normalize_codes(&self.destinations);
        self.via = normalize_optional(self.via.as_deref());
        self.avoid = normalize_optional(self.avoid.as_deref());
    }

    /// Parse the (normalized) codes into a storable entry config.
    pub fn into_entry_config(self) -> Result<EntryConfig, InvalidCrs> {
        let parse_opt = |code: Option<String>| code.as_deref().map(Crs::parse).transpose();

        Ok(EntryConfig {
            station: Crs::parse(&self.station)?,
            destinations: self
                .destinations
                .iter()
                .map(|d| Crs::parse(d))
                .collect::<Result<_, _>>()?,
            via: parse_opt(self.via)?,
            avoid: parse_opt(self.avoid)?,
            api_token: self.api_token,
            max_changes: self.max_changes,
            min_interchange_mins: self.min_interchange_mins,
            planner_provider: self.planner_provider,
            transportapi_app_id: self.transportapi_app_id,
            transportapi_app_key: self.transportapi_app_key,
        })
    }
}

/// Validated entry data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryConfig {
    pub api_token: String,
    pub station: Crs,
    #[serde(default)]
    pub destinations: Vec<Crs>,
    #[serde(default)]
    pub via: Option<Crs>,
    #[serde(default)]
    pub avoid: Option<Crs>,
    #[serde(default = "default_max_changes")]
    pub max_changes: u32,
    #[serde(default = "default_min_interchange_mins")]
    pub min_interchange_mins: u32,
    #[serde(default)]
    pub planner_provider: PlannerProvider,
    #[serde(default)]
    pub transportapi_app_id: Option<String>,
    #[serde(default)]
    pub transportapi_app_key: Option<String>,
}

impl EntryConfig {
    /// The destination journeys are planned to: the first one configured.
    pub fn primary_destination(&self) -> Option<&Crs> {
        self.destinations.first()
    }

    /// Planner credentials, if both id and key are non-blank.
    pub fn planner_credentials(&self) -> Option<PlannerCredentials> {
        let app_id = self.transportapi_app_id.as_deref().map(str::trim)?;
        let app_key = self.transportapi_app_key.as_deref().map(str::trim)?;
        if app_id.is_empty() || app_key.is_empty() {
            return None;
        }
        Some(PlannerCredentials {
            app_id: app_id.to_string(),
            app_key: app_key.to_string(),
        })
    }

    pub fn title(&self) -> String {
        let destinations: Vec<&str> = self.destinations.iter().map(Crs::as_str).collect();
        entry_title(
            self.station.as_str(),
            &destinations,
            self.via.as_ref().map(Crs::as_str),
        )
    }
}

/// `Train Schedule KGX -> EUS,EDB via YRK`; `(any)` when no destinations.
pub fn entry_title<S: AsRef<str>>(station: &str, destinations: &[S], via: Option<&str>) -> String {
    let dests = destinations
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",");
    let dests = if dests.is_empty() { "(any)" } else { &dests };
    let via = via.map(|v| format!(" via {v}")).unwrap_or_default();
    format!("Train Schedule {station} -> {dests}{via}")
}

/// A stored config entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub entry_id: String,
    pub title: String,
    pub data: EntryConfig,
}

impl ConfigEntry {
    /// Wrap entry data under a fresh id.
    pub fn new(title: String, data: EntryConfig) -> Self {
        Self {
            entry_id: uuid::Uuid::new_v4().simple().to_string(),
            title,
            data,
        }
    }
}
