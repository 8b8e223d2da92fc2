//! Askama templates for the web frontend.

use askama::Template;

use crate::registry::EntryOverview;
use crate::sensor::{SensorState, SensorValue};

/// Dashboard listing every entry and its sensors.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub entries: Vec<EntryView>,
}

/// Entry view model for templates.
#[derive(Debug, Clone)]
pub struct EntryView {
    pub entry_id: String,
    pub title: String,
    pub available: bool,
    pub sensors: Vec<SensorView>,
}

impl EntryView {
    pub fn from_overview(overview: &EntryOverview) -> Self {
        Self {
            entry_id: overview.entry.entry_id.clone(),
            title: overview.entry.title.clone(),
            available: overview.available,
            sensors: overview.sensors.iter().map(SensorView::from_state).collect(),
        }
    }
}

/// Sensor view model for templates.
#[derive(Debug, Clone)]
pub struct SensorView {
    pub name: String,
    pub value: String,
    pub available: bool,
}

impl SensorView {
    pub fn from_state(state: &SensorState) -> Self {
        let value = match &state.state {
            Some(SensorValue::Text(text)) => text.clone(),
            Some(SensorValue::Count(count)) => count.to_string(),
            None => "unknown".to_string(),
        };
        Self {
            name: state.name.clone(),
            value,
            available: state.available,
        }
    }
}
