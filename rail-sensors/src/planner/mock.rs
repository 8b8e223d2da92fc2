//! Scripted journey planner for tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::JourneyRequest;

use super::client::JourneyPlanner;
use super::error::PlannerError;

/// Returns a fixed payload (or a fixed failure) and counts calls.
#[derive(Clone)]
pub struct MockPlanner {
    payload: Arc<Mutex<Option<serde_json::Value>>>,
    calls: Arc<AtomicUsize>,
    last_request: Arc<Mutex<Option<JourneyRequest>>>,
}

impl MockPlanner {
    /// Answer every call with `payload`.
    pub fn returning(payload: serde_json::Value) -> Self {
        Self {
            payload: Arc::new(Mutex::new(Some(payload))),
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Fail every call with a server error.
    pub fn failing() -> Self {
        Self {
            payload: Arc::new(Mutex::new(None)),
            calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Swap the scripted payload; `None` switches to failing.
    pub fn set_payload(&self, payload: Option<serde_json::Value>) {
        *self.payload.lock().unwrap() = payload;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<JourneyRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

/// A payload with one route per `(departure, arrival)` pair.
pub fn routes_payload(times: &[(&str, &str)]) -> serde_json::Value {
    let routes: Vec<_> = times
        .iter()
        .map(|(dep, arr)| {
            serde_json::json!({
                "departure_time": dep,
                "arrival_time": arr,
                "duration": "00:45:00",
                "route_parts": [{
                    "mode": "train",
                    "from_point_name": "London Kings Cross",
                    "to_point_name": "London Euston",
                    "departure_time": dep,
                    "arrival_time": arr
                }]
            })
        })
        .collect();
    serde_json::json!({ "routes": routes })
}

impl JourneyPlanner for MockPlanner {
    async fn plan(&self, request: &JourneyRequest) -> Result<serde_json::Value, PlannerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        let payload = self.payload.lock().unwrap().clone();
        payload.ok_or(PlannerError::Api {
            status: 500,
            message: "scripted failure".into(),
        })
    }
}
