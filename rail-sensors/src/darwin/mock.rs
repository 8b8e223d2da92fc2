//! In-memory board source for tests.
//!
//! Accepts one token, rejects a configurable set of station codes, and
//! records every query it sees.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::client::{BoardQuery, BoardSource};
use super::convert::DepartureBoard;
use super::error::DarwinError;

#[derive(Clone, Default)]
pub struct MockBoardSource {
    token: String,
    rejected: HashSet<String>,
    outage: bool,
    calls: Arc<Mutex<Vec<(String, BoardQuery)>>>,
}

impl MockBoardSource {
    pub fn accepting(token: &str) -> Self {
        Self {
            token: token.to_string(),
            ..Default::default()
        }
    }

    /// Reject `code` as station or destination with `InvalidInput`.
    pub fn rejecting(mut self, code: &str) -> Self {
        self.rejected.insert(code.to_string());
        self
    }

    /// Fail every query with a server error.
    pub fn down(mut self) -> Self {
        self.outage = true;
        self
    }

    pub fn calls(&self) -> Vec<(String, BoardQuery)> {
        self.calls.lock().unwrap().clone()
    }
}

impl BoardSource for MockBoardSource {
    async fn departure_board(
        &self,
        token: &str,
        query: &BoardQuery,
    ) -> Result<DepartureBoard, DarwinError> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), query.clone()));

        if self.outage {
            return Err(DarwinError::UnexpectedStatus {
                status: 503,
                message: "service unavailable".into(),
            });
        }
        if token != self.token {
            return Err(DarwinError::InvalidToken);
        }
        let bad = std::iter::once(&query.station)
            .chain(&query.destinations)
            .find(|c| self.rejected.contains(*c) || c.len() != 3);
        if let Some(code) = bad {
            return Err(DarwinError::InvalidInput(code.clone()));
        }

        Ok(DepartureBoard {
            station_name: query.station.clone(),
            crs: query.station.clone(),
            departures: Vec::new(),
        })
    }
}
