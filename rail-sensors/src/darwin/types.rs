//! Darwin API response DTOs.
//!
//! These types map directly to the Darwin LDB JSON API responses.
//! They use `Option` liberally because Darwin omits fields rather than
//! sending null values in many cases. Only the fields the probe and the
//! departure summary read are modelled; serde ignores the rest.

use serde::Deserialize;

/// Response from `GetDepBoardWithDetails`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationBoardWithDetails {
    /// When this response was generated (ISO 8601 datetime).
    pub generated_at: Option<String>,

    /// Human-readable name of the station.
    pub location_name: String,

    /// CRS code of the station.
    pub crs: String,

    /// Train services at this station.
    pub train_services: Option<Vec<ServiceItem>>,

    /// Bus replacement services.
    pub bus_services: Option<Vec<ServiceItem>>,

    /// Whether services are available (false during disruption).
    pub are_services_available: Option<bool>,
}

/// A service on the departure board.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceItem {
    /// Ephemeral Darwin service ID. Only valid while on departure board.
    #[serde(rename = "serviceID")]
    pub service_id: String,

    /// Scheduled time of departure from this station.
    pub std: Option<String>,

    /// Estimated time of departure from this station.
    /// May be "On time", "Delayed", "Cancelled", or a time like "10:15".
    pub etd: Option<String>,

    /// Platform number/letter.
    pub platform: Option<String>,

    /// Train operating company name.
    pub operator: Option<String>,

    /// Whether this service is cancelled.
    pub is_cancelled: Option<bool>,

    /// Destination station(s).
    pub destination: Option<Vec<ServiceLocation>>,
}

/// An origin or destination of a service.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLocation {
    pub location_name: String,
    pub crs: Option<String>,
    /// Extra text such as "via Bath Spa".
    pub via: Option<String>,
}
