//! HTTP API handlers.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::directory::{self, AnnotatedProvider, DataStore, FilterOptions, SearchCriteria, SearchRequest};
use crate::error::SearchError;
use crate::metrics;

use super::page::render_index;

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable provider and plan datasets.
    pub store: Arc<DataStore>,
    /// Prometheus scrape handle, when a recorder is installed.
    pub metrics: Option<PrometheusHandle>,
    /// Directory served under `/static`.
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    /// Create new app state around a loaded store.
    pub fn new(store: DataStore) -> Self {
        Self {
            store: Arc::new(store),
            metrics: None,
            static_dir: None,
        }
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Serve the page's assets from `dir`.
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: String,
}

/// Error body returned for rejected requests.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error kind.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

/// Errors a handler can answer with.
#[derive(Debug)]
pub enum ApiError {
    /// The body is missing, not JSON, or has the wrong shape.
    InvalidBody(JsonRejection),
    /// The body parsed but its values are invalid.
    Search(SearchError),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::Search(SearchError::InvalidPlanId { .. }) => "invalid_plan_id",
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection)
    }
}

impl From<SearchError> for ApiError {
    fn from(err: SearchError) -> Self {
        ApiError::Search(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::InvalidBody(rejection) => rejection.body_text(),
            ApiError::Search(err) => err.to_string(),
        };
        let body = ErrorResponse {
            error: self.kind().to_string(),
            message,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    tag = "service",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Directory page with the specialty, plan and city selectors.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    metrics::inc_page_renders();
    Html(render_index(&state.store.filter_options()))
}

/// Filter choices as JSON.
#[utoipa::path(
    get,
    path = "/api/v1/filters",
    tag = "directory",
    responses((status = 200, description = "Available filter values", body = FilterOptions))
)]
pub async fn filters(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.store.filter_options())
}

/// Search providers by specialty, city and plan.
#[utoipa::path(
    post,
    path = "/search",
    tag = "directory",
    request_body = SearchRequest,
    responses(
        (status = 200, description = "Matching providers in dataset order", body = [AnnotatedProvider]),
        (status = 400, description = "Malformed body or non-integer plan_id", body = ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<Vec<AnnotatedProvider>>, ApiError> {
    let start = Instant::now();

    let criteria = payload
        .map_err(ApiError::from)
        .and_then(|Json(request)| SearchCriteria::try_from(request).map_err(ApiError::from))
        .inspect_err(|e| {
            warn!("Rejected search: {}", e.kind());
            metrics::inc_searches_rejected(e.kind());
        })?;

    let results = directory::search(&state.store, &criteria);
    metrics::record_search(start, results.len());

    Ok(Json(results))
}

/// Prometheus scrape endpoint; 404 when no recorder is installed.
pub async fn metrics_endpoint(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
