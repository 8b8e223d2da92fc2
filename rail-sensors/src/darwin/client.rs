//! Darwin LDB HTTP client.
//!
//! Used by the config flow to check a token and the user's station codes
//! before an entry is accepted. The token travels per request so one
//! client can validate many candidate entries.

use std::future::Future;

use futures::future::try_join_all;
use reqwest::header::HeaderValue;
use tracing::debug;

use crate::domain::Crs;

use super::convert::{DepartureBoard, convert_station_board};
use super::error::DarwinError;
use super::types::StationBoardWithDetails;

/// Default base URL for Darwin LDB API.
const DEFAULT_BASE_URL: &str =
    "https://api1.raildata.org.uk/1010-live-departure-board-dep-with-details/LDBWS";

/// Rows requested for a normal board.
const DEFAULT_NUM_ROWS: u8 = 10;

/// A departure-board query as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardQuery {
    /// Board station code, already normalized.
    pub station: String,
    /// Destination filters; empty means every destination.
    pub destinations: Vec<String>,
    /// Test mode: ask for a single row, only the status matters.
    pub api_test: bool,
}

impl BoardQuery {
    pub fn new(station: impl Into<String>, destinations: Vec<String>) -> Self {
        Self {
            station: station.into(),
            destinations,
            api_test: false,
        }
    }

    /// The fixed route used to check a token.
    pub fn token_check() -> Self {
        Self {
            station: "STP".to_string(),
            destinations: vec!["ZFD".to_string()],
            api_test: true,
        }
    }
}

/// Anything that can answer departure-board queries.
pub trait BoardSource {
    fn departure_board(
        &self,
        token: &str,
        query: &BoardQuery,
    ) -> impl Future<Output = Result<DepartureBoard, DarwinError>> + Send;
}

/// Configuration for the Darwin client.
#[derive(Debug, Clone)]
pub struct DarwinConfig {
    /// Base URL for the API (defaults to production Darwin)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Rows per board outside test mode
    pub num_rows: u8,
}

impl DarwinConfig {
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

impl Default for DarwinConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            num_rows: DEFAULT_NUM_ROWS,
        }
    }
}

/// Darwin LDB API client.
#[derive(Debug, Clone)]
pub struct DarwinClient {
    http: reqwest::Client,
    base_url: String,
    num_rows: u8,
}

impl DarwinClient {
    /// Create a new Darwin client with the given configuration.
    pub fn new(config: DarwinConfig) -> Result<Self, DarwinError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            num_rows: config.num_rows,
        })
    }

    /// Fetch one board, optionally filtered to services calling at `filter_crs`.
    async fn fetch_board(
        &self,
        token: &HeaderValue,
        crs: &Crs,
        filter_crs: Option<&Crs>,
        num_rows: u8,
    ) -> Result<DepartureBoard, DarwinError> {
        let url = format!(
            "{}/api/20220120/GetDepBoardWithDetails/{}",
            self.base_url,
            crs.as_str()
        );

        let mut params = vec![("numRows", num_rows.to_string())];
        if let Some(filter) = filter_crs {
            params.push(("filterCrs", filter.as_str().to_string()));
            params.push(("filterType", "to".to_string()));
        }

        let response = self
            .http
            .get(&url)
            .header("x-apikey", token.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(DarwinError::InvalidToken);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DarwinError::RateLimited);
        }

        if status == reqwest::StatusCode::BAD_REQUEST || status == reqwest::StatusCode::NOT_FOUND {
            let body = response.text().await.unwrap_or_default();
            return Err(DarwinError::InvalidInput(format!("{crs}: {body}")));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DarwinError::UnexpectedStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let board: StationBoardWithDetails =
            serde_json::from_str(&body).map_err(|e| DarwinError::Decode {
                message: e.to_string(),
                body: body.chars().take(500).collect(),
            })?;

        Ok(convert_station_board(&board))
    }
}

impl BoardSource for DarwinClient {
    async fn departure_board(
        &self,
        token: &str,
        query: &BoardQuery,
    ) -> Result<DepartureBoard, DarwinError> {
        let token = HeaderValue::from_str(token).map_err(|_| DarwinError::InvalidToken)?;
        let station = parse_code(&query.station)?;
        let destinations = query
            .destinations
            .iter()
            .map(|d| parse_code(d))
            .collect::<Result<Vec<_>, _>>()?;
        let num_rows = if query.api_test { 1 } else { self.num_rows };

        debug!(
            station = %station,
            destinations = destinations.len(),
            api_test = query.api_test,
            "fetching departure board"
        );

        if destinations.is_empty() {
            return self.fetch_board(&token, &station, None, num_rows).await;
        }

        let boards = try_join_all(
            destinations
                .iter()
                .map(|dest| self.fetch_board(&token, &station, Some(dest), num_rows)),
        )
        .await?;

        DepartureBoard::merge(boards).ok_or_else(|| DarwinError::InvalidInput(query.station.clone()))
    }
}

fn parse_code(code: &str) -> Result<Crs, DarwinError> {
    Crs::parse(code).map_err(|e| DarwinError::InvalidInput(format!("{code:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    async fn board_handler(
        Path(crs): Path<String>,
        Query(params): Query<HashMap<String, String>>,
        headers: HeaderMap,
    ) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
        if headers.get("x-apikey").and_then(|v| v.to_str().ok()) != Some("good-token") {
            return Err((StatusCode::UNAUTHORIZED, "bad key".into()));
        }
        if crs == "QQQ" {
            return Err((StatusCode::BAD_REQUEST, "Invalid crs code supplied".into()));
        }
        let filter = params.get("filterCrs").cloned().unwrap_or_default();
        let rows: usize = params
            .get("numRows")
            .and_then(|n| n.parse().ok())
            .unwrap_or(10);
        let services: Vec<_> = (0..rows.min(2))
            .map(|i| {
                serde_json::json!({
                    "serviceID": format!("{filter}{i}"),
                    "std": format!("10:{:02}", i * 15),
                    "etd": "On time",
                    "destination": [{"locationName": format!("To {filter}"), "crs": filter}]
                })
            })
            .collect();
        Ok(Json(serde_json::json!({
            "locationName": format!("Station {crs}"),
            "crs": crs,
            "trainServices": services
        })))
    }

    async fn spawn_stub() -> String {
        let app = Router::new().route(
            "/api/20220120/GetDepBoardWithDetails/:crs",
            get(board_handler),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn client() -> DarwinClient {
        let base = spawn_stub().await;
        DarwinClient::new(DarwinConfig::default().with_base_url(base).with_timeout(5)).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = DarwinConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.num_rows, DEFAULT_NUM_ROWS);
    }

    #[test]
    fn token_check_query() {
        let q = BoardQuery::token_check();
        assert_eq!(q.station, "STP");
        assert_eq!(q.destinations, vec!["ZFD"]);
        assert!(q.api_test);
    }

    #[tokio::test]
    async fn token_check_succeeds_with_good_token() {
        let client = client().await;
        let board = client
            .departure_board("good-token", &BoardQuery::token_check())
            .await
            .unwrap();
        assert_eq!(board.crs, "STP");
        // Test mode asks for one row.
        assert_eq!(board.departures.len(), 1);
    }

    #[tokio::test]
    async fn bad_token_is_invalid_token() {
        let client = client().await;
        let err = client
            .departure_board("nope", &BoardQuery::token_check())
            .await
            .unwrap_err();
        assert!(matches!(err, DarwinError::InvalidToken));
    }

    #[tokio::test]
    async fn unprintable_token_is_invalid_token() {
        let client = client().await;
        let err = client
            .departure_board("bad\ntoken", &BoardQuery::token_check())
            .await
            .unwrap_err();
        assert!(matches!(err, DarwinError::InvalidToken));
    }

    #[tokio::test]
    async fn rejected_station_is_invalid_input() {
        let client = client().await;
        let err = client
            .departure_board("good-token", &BoardQuery::new("QQQ", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, DarwinError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn malformed_code_fails_without_request() {
        // Nothing listens here; a request would surface as an HTTP error.
        let client = DarwinClient::new(
            DarwinConfig::default()
                .with_base_url("http://127.0.0.1:9")
                .with_timeout(1),
        )
        .unwrap();
        let err = client
            .departure_board("good-token", &BoardQuery::new("KGX", vec!["EU5".into()]))
            .await
            .unwrap_err();
        assert!(matches!(err, DarwinError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn multiple_destinations_are_merged() {
        let client = client().await;
        let board = client
            .departure_board(
                "good-token",
                &BoardQuery::new("KGX", vec!["EDB".into(), "YRK".into()]),
            )
            .await
            .unwrap();
        assert_eq!(board.station_name, "Station KGX");
        assert_eq!(board.departures.len(), 4);
    }
}
