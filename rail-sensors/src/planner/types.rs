//! TransportAPI journey response DTOs.
//!
//! Only the fields the simplified itinerary reads are modelled.

use serde::Deserialize;

/// Top level of a `public_journey` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JourneyResponse {
    #[serde(default)]
    pub routes: Vec<RouteDto>,
}

/// One candidate journey.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteDto {
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    /// "HH:MM:SS"
    pub duration: Option<String>,
    #[serde(default)]
    pub route_parts: Vec<RoutePartDto>,
}

/// One part of a route.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutePartDto {
    /// "train", "bus", "foot", ...
    pub mode: Option<String>,
    pub from_point_name: Option<String>,
    pub to_point_name: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_time: Option<String>,
    pub line_name: Option<String>,
    pub destination: Option<String>,
}
