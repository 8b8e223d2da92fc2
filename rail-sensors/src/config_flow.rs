//! Config flow: validates a submitted form before an entry is created.
//!
//! Validation probes the departure-board service twice: once on a fixed
//! route to check the token, then with the user's own station and
//! destinations. The probe client is built lazily, once per flow, and
//! reused for every later validation.

use std::collections::BTreeMap;

use serde::Serialize;
use tokio::sync::OnceCell;
use tracing::{error, info, warn};

use crate::darwin::{BoardQuery, BoardSource, DarwinError};
use crate::domain::is_known;
use crate::entry::{EntryConfig, UserInput, entry_title};

pub const STEP_USER: &str = "user";

/// Why a submitted form was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("token rejected by the departure board service")]
    InvalidToken,

    #[error("station or destination rejected: {0}")]
    InvalidInput(String),

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ValidationError {
    /// The form error code shown to the user.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidToken => "invalid_token",
            ValidationError::InvalidInput(_) => "invalid_station_input",
            ValidationError::Unknown(_) => "unknown",
        }
    }
}

type ClientFactory<B> = Box<dyn Fn() -> Result<B, DarwinError> + Send + Sync>;

/// Lazily built, reused probe client.
pub struct ProbeContext<B> {
    client: OnceCell<B>,
    factory: ClientFactory<B>,
}

impl<B: BoardSource> ProbeContext<B> {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Result<B, DarwinError> + Send + Sync + 'static,
    {
        Self {
            client: OnceCell::new(),
            factory: Box::new(factory),
        }
    }

    /// The shared client, created on first use.
    pub async fn client(&self) -> Result<&B, DarwinError> {
        self.client
            .get_or_try_init(|| async { (self.factory)() })
            .await
    }
}

/// A validated form ready to become a config entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInfo {
    pub title: String,
    pub data: EntryConfig,
}

/// Check a form against the departure board service and normalize it.
pub async fn validate_input<B: BoardSource>(
    probe: &ProbeContext<B>,
    mut input: UserInput,
) -> Result<EntryInfo, ValidationError> {
    let client = probe
        .client()
        .await
        .map_err(|e| ValidationError::Unknown(e.to_string()))?;

    match client
        .departure_board(&input.api_token, &BoardQuery::token_check())
        .await
    {
        Ok(_) => {}
        Err(DarwinError::InvalidToken) => {
            warn!("departure board service rejected the token");
            return Err(ValidationError::InvalidToken);
        }
        Err(e) => return Err(ValidationError::Unknown(e.to_string())),
    }

    input.normalize();
    warn_unknown_codes(&input);

    let query = BoardQuery::new(input.station.clone(), input.destinations.clone());
    match client.departure_board(&input.api_token, &query).await {
        Ok(board) => {
            let next_departure = board
                .departures
                .first()
                .map(|d| d.to_string())
                .unwrap_or_else(|| "none".to_string());
            info!(
                station = %board.crs,
                station_name = %board.station_name,
                departures = board.departures.len(),
                next_departure = %next_departure,
                "station input accepted"
            );
        }
        Err(DarwinError::InvalidInput(msg)) => {
            warn!(station = %input.station, error = %msg, "station input rejected");
            return Err(ValidationError::InvalidInput(msg));
        }
        Err(e) => return Err(ValidationError::Unknown(e.to_string())),
    }

    let title = entry_title(&input.station, &input.destinations, input.via.as_deref());
    let data = input
        .into_entry_config()
        .map_err(|e| ValidationError::InvalidInput(e.to_string()))?;

    Ok(EntryInfo { title, data })
}

fn warn_unknown_codes(input: &UserInput) {
    let codes = std::iter::once(&input.station)
        .chain(&input.destinations)
        .chain(input.via.as_ref())
        .chain(input.avoid.as_ref());
    for code in codes {
        if !is_known(code) {
            warn!(code = %code, "station code is not in the built-in list");
        }
    }
}

/// Outcome of a flow step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowResult {
    /// Show the form (again), with errors keyed by field or `base`.
    Form {
        step_id: &'static str,
        errors: BTreeMap<String, String>,
    },
    /// Validation passed; create the entry.
    CreateEntry { title: String, data: EntryConfig },
}

/// The user-facing config flow.
pub struct ConfigFlow<B> {
    probe: ProbeContext<B>,
}

impl<B: BoardSource> ConfigFlow<B> {
    pub fn new(probe: ProbeContext<B>) -> Self {
        Self { probe }
    }

    /// Handle the single `user` step.
    pub async fn step_user(&self, input: Option<UserInput>) -> FlowResult {
        let Some(input) = input else {
            return FlowResult::Form {
                step_id: STEP_USER,
                errors: BTreeMap::new(),
            };
        };

        match validate_input(&self.probe, input).await {
            Ok(info) => FlowResult::CreateEntry {
                title: info.title,
                data: info.data,
            },
            Err(e) => {
                if let ValidationError::Unknown(detail) = &e {
                    error!(error = %detail, "unexpected exception during validation");
                }
                let mut errors = BTreeMap::new();
                errors.insert("base".to_string(), e.code().to_string());
                FlowResult::Form {
                    step_id: STEP_USER,
                    errors,
                }
            }
        }
    }
}
