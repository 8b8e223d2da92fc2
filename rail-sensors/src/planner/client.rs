//! TransportAPI journey planner client.
//!
//! One request per call and no retries; the coordinator decides what a
//! failed poll means.

use std::future::Future;

use tracing::debug;

use crate::domain::{Crs, JourneyRequest};

use super::config::TransportApiConfig;
use super::error::PlannerError;

/// A journey-planning provider.
pub trait JourneyPlanner {
    /// Plan a journey and return the provider's raw payload.
    fn plan(
        &self,
        request: &JourneyRequest,
    ) -> impl Future<Output = Result<serde_json::Value, PlannerError>> + Send;
}

/// TransportAPI `public_journey` client.
#[derive(Debug, Clone)]
pub struct TransportApiClient {
    http: reqwest::Client,
    base_url: String,
    app_id: String,
    app_key: String,
}

impl TransportApiClient {
    pub fn new(config: TransportApiConfig) -> Result<Self, PlannerError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            app_id: config.credentials.app_id,
            app_key: config.credentials.app_key,
        })
    }

    /// Query parameters for a request, credentials last.
    fn query_params(&self, request: &JourneyRequest) -> Vec<(&'static str, String)> {
        let when = request.when();
        let mut params = vec![
            ("from", station_ref(request.origin())),
            ("to", station_ref(request.destination())),
            ("date", when.format("%Y-%m-%d").to_string()),
            ("time", when.format("%H:%M").to_string()),
            ("modes", "train".to_string()),
        ];
        if let Some(via) = request.via() {
            params.push(("via", station_ref(via)));
        }
        if let Some(avoid) = request.avoid() {
            params.push(("not_via", station_ref(avoid)));
        }
        params.push(("max_changes", request.max_changes().to_string()));
        params.push((
            "min_interchange_mins",
            request.min_interchange_mins().to_string(),
        ));
        params.push(("app_id", self.app_id.clone()));
        params.push(("app_key", self.app_key.clone()));
        params
    }
}

fn station_ref(crs: &Crs) -> String {
    format!("crs:{crs}")
}

impl JourneyPlanner for TransportApiClient {
    async fn plan(&self, request: &JourneyRequest) -> Result<serde_json::Value, PlannerError> {
        let url = format!("{}/v3/uk/public_journey.json", self.base_url);

        debug!(
            origin = %request.origin(),
            destination = %request.destination(),
            "requesting journey plan"
        );

        let response = self
            .http
            .get(&url)
            .query(&self.query_params(request))
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(PlannerError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(PlannerError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlannerError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| PlannerError::Json {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;

    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use chrono::DateTime;

    use crate::planner::PlannerCredentials;

    fn creds(key: &str) -> PlannerCredentials {
        PlannerCredentials {
            app_id: "app".into(),
            app_key: key.into(),
        }
    }

    fn request(via: Option<&str>, avoid: Option<&str>) -> JourneyRequest {
        JourneyRequest::new(
            Crs::parse("KGX").unwrap(),
            Crs::parse("EDB").unwrap(),
            via.map(|v| Crs::parse(v).unwrap()),
            avoid.map(|v| Crs::parse(v).unwrap()),
            DateTime::parse_from_rfc3339("2024-03-15T09:05:00+00:00").unwrap(),
            2,
            5,
        )
    }

    async fn journey_handler(
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
        match params.get("app_key").map(String::as_str) {
            Some("good") => {}
            Some("busy") => return Err((StatusCode::TOO_MANY_REQUESTS, String::new())),
            Some("broken") => return Err((StatusCode::BAD_GATEWAY, "upstream".into())),
            _ => return Err((StatusCode::FORBIDDEN, String::new())),
        }
        // Echo the query back so tests can inspect what was sent.
        Ok(Json(serde_json::json!({ "routes": [], "echo": params })))
    }

    async fn spawn_stub() -> String {
        let app = Router::new().route("/v3/uk/public_journey.json", get(journey_handler));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn client(key: &str) -> TransportApiClient {
        let base = spawn_stub().await;
        TransportApiClient::new(TransportApiConfig::new(creds(key)).with_base_url(base)).unwrap()
    }

    #[tokio::test]
    async fn sends_route_and_constraints() {
        let client = client("good").await;
        let payload = client.plan(&request(Some("YRK"), Some("LDS"))).await.unwrap();
        let echo = &payload["echo"];
        assert_eq!(echo["from"], "crs:KGX");
        assert_eq!(echo["to"], "crs:EDB");
        assert_eq!(echo["date"], "2024-03-15");
        assert_eq!(echo["time"], "09:05");
        assert_eq!(echo["via"], "crs:YRK");
        assert_eq!(echo["not_via"], "crs:LDS");
        assert_eq!(echo["max_changes"], "2");
        assert_eq!(echo["min_interchange_mins"], "5");
        assert_eq!(echo["app_id"], "app");
    }

    #[tokio::test]
    async fn omits_absent_via_and_avoid() {
        let client = client("good").await;
        let payload = client.plan(&request(None, None)).await.unwrap();
        assert!(payload["echo"].get("via").is_none());
        assert!(payload["echo"].get("not_via").is_none());
    }

    #[tokio::test]
    async fn maps_error_statuses() {
        let err = client("wrong").await.plan(&request(None, None)).await.unwrap_err();
        assert!(matches!(err, PlannerError::Unauthorized));

        let err = client("busy").await.plan(&request(None, None)).await.unwrap_err();
        assert!(matches!(err, PlannerError::RateLimited));

        let err = client("broken").await.plan(&request(None, None)).await.unwrap_err();
        assert!(matches!(err, PlannerError::Api { status: 502, .. }));
    }
}
