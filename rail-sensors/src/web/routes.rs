//! HTTP route handlers.

use askama::Template;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::config_flow::FlowResult;
use crate::darwin::BoardSource;
use crate::entry::UserInput;
use crate::planner::JourneyPlanner;
use crate::registry::RegistryError;

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router<P, B>(state: AppState<P, B>) -> Router
where
    P: JourneyPlanner + Send + Sync + 'static,
    B: BoardSource + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(dashboard::<P, B>))
        .route("/health", get(health))
        .route(
            "/api/entries",
            get(list_entries::<P, B>).post(create_entry::<P, B>),
        )
        .route("/api/entries/:id", delete(delete_entry::<P, B>))
        .route("/api/entries/:id/snapshot", get(entry_snapshot::<P, B>))
        .route("/api/entries/:id/refresh", post(refresh_entry::<P, B>))
        .route("/api/sensors", get(list_sensors::<P, B>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn dashboard<P, B>(State(state): State<AppState<P, B>>) -> Result<Html<String>, AppError>
where
    P: JourneyPlanner + Send + Sync + 'static,
{
    let entries = state
        .registry
        .overview()
        .await
        .iter()
        .map(EntryView::from_overview)
        .collect();

    let html = DashboardTemplate { entries }
        .render()
        .map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;
    Ok(Html(html))
}

async fn list_entries<P, B>(State(state): State<AppState<P, B>>) -> Json<EntriesResponse>
where
    P: JourneyPlanner + Send + Sync + 'static,
{
    let entries = state
        .registry
        .entries()
        .await
        .iter()
        .map(EntrySummary::from_entry)
        .collect();
    Json(EntriesResponse { entries })
}

/// Run the `user` step of the config flow.
///
/// A request without a JSON body gets the empty form. A form the flow
/// rejects comes back with its errors, and an accepted one is set up and
/// persisted. A JSON body that does not decode is a 400.
async fn create_entry<P, B>(
    State(state): State<AppState<P, B>>,
    input: Result<Json<UserInput>, JsonRejection>,
) -> Result<Response, AppError>
where
    P: JourneyPlanner + Send + Sync + 'static,
    B: BoardSource + Send + Sync + 'static,
{
    let input = match input {
        Ok(Json(input)) => Some(input),
        Err(JsonRejection::MissingJsonContentType(_)) => None,
        Err(rejection) => {
            return Err(AppError::BadRequest {
                message: rejection.body_text(),
            });
        }
    };

    match state.flow.step_user(input).await {
        FlowResult::Form { step_id, errors } => {
            Ok(Json(FlowResponse::Form { step_id, errors }).into_response())
        }
        FlowResult::CreateEntry { title, data } => {
            let entry = state.registry.add_entry(title, data).await?;
            let body = FlowResponse::CreateEntry {
                entry: EntrySummary::from_entry(&entry),
            };
            Ok((StatusCode::CREATED, Json(body)).into_response())
        }
    }
}

async fn delete_entry<P, B>(
    State(state): State<AppState<P, B>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    P: JourneyPlanner + Send + Sync + 'static,
{
    state.registry.remove_entry(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn entry_snapshot<P, B>(
    State(state): State<AppState<P, B>>,
    Path(id): Path<String>,
) -> Result<Json<SnapshotResponse>, AppError>
where
    P: JourneyPlanner + Send + Sync + 'static,
{
    let coordinator_state = state.registry.state(&id).await?;
    Ok(Json(coordinator_state.into()))
}

async fn refresh_entry<P, B>(
    State(state): State<AppState<P, B>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError>
where
    P: JourneyPlanner + Send + Sync + 'static,
{
    state.registry.request_refresh(&id).await?;
    Ok(StatusCode::ACCEPTED)
}

async fn list_sensors<P, B>(State(state): State<AppState<P, B>>) -> Json<SensorsResponse>
where
    P: JourneyPlanner + Send + Sync + 'static,
{
    Json(SensorsResponse {
        sensors: state.registry.sensor_states().await,
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::UnknownEntry(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(status = %status, error = %message, "request failed");
        } else {
            warn!(status = %status, error = %message, "request rejected");
        }

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
