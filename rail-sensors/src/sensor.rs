//! Read-only sensor views over a coordinator's latest snapshot.
//!
//! Sensors hold no data of their own: every read goes to the snapshot
//! reader, so values change as soon as a new snapshot is published.

use serde::Serialize;
use serde_json::{Value, json};

use crate::coordinator::SnapshotReader;
use crate::domain::Crs;
use crate::entry::EntryConfig;

const DOMAIN: &str = "nationalrailuk";

/// A sensor's current value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SensorValue {
    Text(String),
    Count(usize),
}

/// Device grouping shown alongside the sensors of one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    pub identifiers: Vec<(String, String)>,
    pub name: String,
    pub manufacturer: String,
    pub model: String,
}

/// Everything a client needs to render a sensor.
#[derive(Debug, Clone, Serialize)]
pub struct SensorState {
    pub unique_id: String,
    pub name: String,
    pub icon: &'static str,
    pub state: Option<SensorValue>,
    pub available: bool,
    pub attributes: Value,
}

/// A sensor entity.
pub trait Sensor: Send + Sync {
    fn name(&self) -> String;
    fn unique_id(&self) -> String;
    fn icon(&self) -> &'static str;
    fn native_value(&self) -> Option<SensorValue>;
    fn extra_state_attributes(&self) -> Value;
    fn available(&self) -> bool;
    fn device_info(&self) -> DeviceInfo;

    fn state(&self) -> SensorState {
        SensorState {
            unique_id: self.unique_id(),
            name: self.name(),
            icon: self.icon(),
            state: self.native_value(),
            available: self.available(),
            attributes: self.extra_state_attributes(),
        }
    }
}

/// Shared identity of the sensors of one entry.
#[derive(Clone)]
struct SensorContext {
    origin: String,
    dest: String,
    via: Option<String>,
    entry_id: String,
    reader: SnapshotReader,
}

impl SensorContext {
    fn new(entry_id: &str, entry: &EntryConfig, reader: SnapshotReader) -> Self {
        Self {
            origin: entry.station.to_string(),
            dest: entry
                .primary_destination()
                .map(Crs::to_string)
                .unwrap_or_else(|| "?".to_string()),
            via: entry.via.map(|v| v.to_string()),
            entry_id: entry_id.to_string(),
            reader,
        }
    }

    fn via_suffix(&self) -> String {
        self.via
            .as_ref()
            .map(|v| format!(" via {v}"))
            .unwrap_or_default()
    }

    fn route_label(&self) -> String {
        format!("{} → {}{}", self.origin, self.dest, self.via_suffix())
    }

    fn unique_id(&self, kind: &str) -> String {
        format!(
            "{}_{}_{}_{}_{}",
            self.entry_id,
            kind,
            self.origin,
            self.dest,
            self.via.as_deref().unwrap_or("")
        )
    }

    fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            identifiers: vec![(DOMAIN.to_string(), self.entry_id.clone())],
            name: format!("National Rail ({})", self.route_label()),
            manufacturer: "National Rail / TransportAPI".to_string(),
            model: "Journey Planner".to_string(),
        }
    }
}

/// The best itinerary, as `"dep → arr"`.
pub struct NextJourneySensor {
    ctx: SensorContext,
}

impl Sensor for NextJourneySensor {
    fn name(&self) -> String {
        format!("Next journey {}", self.ctx.route_label())
    }

    fn unique_id(&self) -> String {
        self.ctx.unique_id("next")
    }

    fn icon(&self) -> &'static str {
        "mdi:train"
    }

    fn native_value(&self) -> Option<SensorValue> {
        let snapshot = self.ctx.reader.latest()?;
        let first = snapshot.itineraries().first()?;
        first.summary().map(SensorValue::Text)
    }

    fn extra_state_attributes(&self) -> Value {
        let ctx = &self.ctx;
        let snapshot = ctx.reader.latest();
        let first = snapshot.as_deref().and_then(|s| s.itineraries().first());

        match (first, snapshot.as_deref()) {
            (Some(first), Some(snapshot)) => json!({
                "origin": ctx.origin,
                "destination": ctx.dest,
                "via": ctx.via,
                "duration": first.duration,
                "changes": first.changes,
                "legs": first.legs,
                "when": snapshot.when(),
            }),
            _ => json!({
                "origin": ctx.origin,
                "destination": ctx.dest,
                "via": ctx.via,
                "itineraries": [],
            }),
        }
    }

    fn available(&self) -> bool {
        self.ctx.reader.available()
    }

    fn device_info(&self) -> DeviceInfo {
        self.ctx.device_info()
    }
}

/// How many itineraries the last poll produced, with the full list.
pub struct ItinerariesSensor {
    ctx: SensorContext,
}

impl Sensor for ItinerariesSensor {
    fn name(&self) -> String {
        format!("Itineraries {}", self.ctx.route_label())
    }

    fn unique_id(&self) -> String {
        self.ctx.unique_id("itins")
    }

    fn icon(&self) -> &'static str {
        "mdi:format-list-bulleted"
    }

    fn native_value(&self) -> Option<SensorValue> {
        let snapshot = self.ctx.reader.latest()?;
        if snapshot.error().is_some() {
            return None;
        }
        Some(SensorValue::Count(snapshot.itineraries().len()))
    }

    fn extra_state_attributes(&self) -> Value {
        let ctx = &self.ctx;
        let snapshot = ctx.reader.latest();
        json!({
            "origin": ctx.origin,
            "destination": ctx.dest,
            "via": ctx.via,
            "itineraries": snapshot.as_deref().map(|s| s.itineraries()).unwrap_or_default(),
            "when": snapshot.as_deref().map(|s| s.when()),
        })
    }

    fn available(&self) -> bool {
        self.ctx.reader.available()
    }

    fn device_info(&self) -> DeviceInfo {
        self.ctx.device_info()
    }
}

/// Build the sensors for one entry.
pub fn entry_sensors(
    entry_id: &str,
    entry: &EntryConfig,
    reader: SnapshotReader,
) -> Vec<Box<dyn Sensor>> {
    let ctx = SensorContext::new(entry_id, entry, reader);
    vec![
        Box::new(NextJourneySensor { ctx: ctx.clone() }),
        Box::new(ItinerariesSensor { ctx }),
    ]
}
