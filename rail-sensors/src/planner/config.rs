//! Journey planner provider configuration.

use serde::{Deserialize, Serialize};

/// Default base URL for TransportAPI.
pub const DEFAULT_TRANSPORTAPI_URL: &str = "https://transportapi.com";

/// Which journey-planning provider an entry asks for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlannerProvider {
    #[default]
    TransportApi,
    /// Accepted in configuration; not implemented, TransportAPI is used.
    Ojp,
}

impl PlannerProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlannerProvider::TransportApi => "transportapi",
            PlannerProvider::Ojp => "ojp",
        }
    }
}

/// App id and key pair for TransportAPI.
#[derive(Clone, PartialEq, Eq)]
pub struct PlannerCredentials {
    pub app_id: String,
    pub app_key: String,
}

impl std::fmt::Debug for PlannerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlannerCredentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .finish()
    }
}

/// Configuration for the TransportAPI client.
#[derive(Debug, Clone)]
pub struct TransportApiConfig {
    pub credentials: PlannerCredentials,
    /// Base URL (defaults to production TransportAPI)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TransportApiConfig {
    /// Create a new config with the given credentials.
    pub fn new(credentials: PlannerCredentials) -> Self {
        Self {
            credentials,
            base_url: DEFAULT_TRANSPORTAPI_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
