//! Data transfer objects for web requests and responses.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::coordinator::CoordinatorState;
use crate::domain::{Crs, Snapshot};
use crate::entry::ConfigEntry;
use crate::planner::PlannerProvider;
use crate::sensor::SensorState;

/// A config entry as exposed over HTTP. Secrets are left out.
#[derive(Debug, Serialize)]
pub struct EntrySummary {
    pub entry_id: String,
    pub title: String,
    pub station: Crs,
    pub destinations: Vec<Crs>,
    pub via: Option<Crs>,
    pub avoid: Option<Crs>,
    pub max_changes: u32,
    pub min_interchange_mins: u32,
    pub planner_provider: PlannerProvider,
    /// Whether both TransportAPI id and key are set.
    pub has_planner_credentials: bool,
}

impl EntrySummary {
    pub fn from_entry(entry: &ConfigEntry) -> Self {
        let data = &entry.data;
        Self {
            entry_id: entry.entry_id.clone(),
            title: entry.title.clone(),
            station: data.station,
            destinations: data.destinations.clone(),
            via: data.via,
            avoid: data.avoid,
            max_changes: data.max_changes,
            min_interchange_mins: data.min_interchange_mins,
            planner_provider: data.planner_provider,
            has_planner_credentials: data.planner_credentials().is_some(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<EntrySummary>,
}

/// Response to a config flow step.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowResponse {
    Form {
        step_id: &'static str,
        errors: BTreeMap<String, String>,
    },
    CreateEntry {
        entry: EntrySummary,
    },
}

/// Coordinator state for one entry.
#[derive(Debug, Serialize)]
pub struct SnapshotResponse {
    pub available: bool,
    pub last_updated: Option<DateTime<FixedOffset>>,
    pub last_error: Option<String>,
    pub snapshot: Option<Arc<Snapshot>>,
}

impl From<CoordinatorState> for SnapshotResponse {
    fn from(state: CoordinatorState) -> Self {
        Self {
            available: state.last_update_success,
            last_updated: state.last_updated,
            last_error: state.last_error,
            snapshot: state.data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SensorsResponse {
    pub sensors: Vec<SensorState>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
