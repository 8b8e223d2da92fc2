//! Mapping from provider payloads to simplified itineraries.

use serde::Deserialize;

use crate::domain::{Itinerary, ItineraryLeg};

use super::error::PlannerError;
use super::types::{JourneyResponse, RouteDto, RoutePartDto};

/// Map a raw TransportAPI payload to itineraries in provider order.
///
/// Pure: fields outside the simplified shape are dropped and nothing is
/// reordered or truncated here.
pub fn to_simple_itineraries(payload: &serde_json::Value) -> Result<Vec<Itinerary>, PlannerError> {
    let response = JourneyResponse::deserialize(payload).map_err(|e| PlannerError::Json {
        message: e.to_string(),
    })?;

    Ok(response.routes.iter().map(convert_route).collect())
}

fn convert_route(route: &RouteDto) -> Itinerary {
    let legs: Vec<ItineraryLeg> = route.route_parts.iter().map(convert_part).collect();

    let rides = legs.iter().filter(|l| !l.is_walk()).count() as u32;
    let changes = (!legs.is_empty()).then(|| rides.saturating_sub(1));

    Itinerary {
        departure_time: route
            .departure_time
            .clone()
            .or_else(|| legs.first().and_then(|l| l.departure_time.clone())),
        arrival_time: route
            .arrival_time
            .clone()
            .or_else(|| legs.last().and_then(|l| l.arrival_time.clone())),
        duration: route.duration.clone(),
        changes,
        legs,
    }
}

fn convert_part(part: &RoutePartDto) -> ItineraryLeg {
    ItineraryLeg {
        mode: part.mode.clone(),
        from: part.from_point_name.clone(),
        to: part.to_point_name.clone(),
        departure_time: part.departure_time.clone(),
        arrival_time: part.arrival_time.clone(),
        line: part.line_name.clone(),
        destination: part.destination.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn part(mode: &str, from: &str, to: &str, dep: &str, arr: &str) -> serde_json::Value {
        json!({
            "mode": mode,
            "from_point_name": from,
            "to_point_name": to,
            "departure_time": dep,
            "arrival_time": arr,
            "line_name": "L",
            "destination": to,
            "coordinates": []
        })
    }

    #[test]
    fn maps_routes_in_order() {
        let payload = json!({
            "routes": [
                {
                    "departure_time": "10:00", "arrival_time": "10:45", "duration": "00:45:00",
                    "route_parts": [part("train", "KGX", "SVG", "10:00", "10:45")]
                },
                {
                    "departure_time": "10:10", "arrival_time": "11:20", "duration": "01:10:00",
                    "route_parts": [
                        part("train", "KGX", "FPK", "10:10", "10:20"),
                        part("foot", "FPK", "FPK", "10:20", "10:25"),
                        part("train", "FPK", "SVG", "10:30", "11:20")
                    ]
                }
            ]
        });

        let itins = to_simple_itineraries(&payload).unwrap();
        assert_eq!(itins.len(), 2);
        assert_eq!(itins[0].departure_time.as_deref(), Some("10:00"));
        assert_eq!(itins[0].changes, Some(0));
        assert_eq!(itins[1].departure_time.as_deref(), Some("10:10"));
        assert_eq!(itins[1].changes, Some(1));
        assert_eq!(itins[1].legs.len(), 3);
        assert_eq!(itins[1].legs[2].from.as_deref(), Some("FPK"));
        assert_eq!(itins[1].duration.as_deref(), Some("01:10:00"));
    }

    #[test]
    fn falls_back_to_leg_times() {
        let payload = json!({
            "routes": [{ "route_parts": [part("train", "A", "B", "09:00", "09:30")] }]
        });
        let itins = to_simple_itineraries(&payload).unwrap();
        assert_eq!(itins[0].departure_time.as_deref(), Some("09:00"));
        assert_eq!(itins[0].arrival_time.as_deref(), Some("09:30"));
    }

    #[test]
    fn route_without_parts_has_unknown_changes() {
        let payload = json!({ "routes": [{ "departure_time": "08:00" }] });
        let itins = to_simple_itineraries(&payload).unwrap();
        assert_eq!(itins[0].changes, None);
        assert!(itins[0].legs.is_empty());
    }

    #[test]
    fn missing_routes_is_empty() {
        assert!(to_simple_itineraries(&json!({})).unwrap().is_empty());
    }

    #[test]
    fn wrong_shape_is_json_error() {
        let err = to_simple_itineraries(&json!({ "routes": "nope" })).unwrap_err();
        assert!(matches!(err, PlannerError::Json { .. }));
    }

    #[test]
    fn extra_fields_are_dropped() {
        let payload = json!({
            "routes": [{ "departure_time": "10:00", "fare": { "total": 12.5 } }]
        });
        let json = serde_json::to_value(&to_simple_itineraries(&payload).unwrap()[0]).unwrap();
        assert!(json.get("fare").is_none());
    }
}
