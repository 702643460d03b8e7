//! HTTP routes for the query service.

use std::sync::Arc;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use super::params::{ErrorDetail, HealthStatus, QueryRequest};
use crate::agent::{Orchestrator, QueryResponse, validate_query};

/// Shared API state.
#[derive(Clone)]
pub struct ApiState {
    orchestrator: Arc<Orchestrator>,
    debug: bool,
}

impl ApiState {
    /// Wraps an orchestrator; `debug_info` is exposed iff the configuration
    /// enables debug output.
    #[must_use]
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        let debug = orchestrator.config().debug;
        Self {
            orchestrator,
            debug,
        }
    }
}

/// Builds the API router with permissive CORS.
#[must_use]
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/api/query", post(query))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// `POST /api/query`
async fn query(
    State(state): State<ApiState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, (StatusCode, Json<ErrorDetail>)> {
    if let Err(e) = validate_query(&request.query) {
        warn!(error = %e, "rejecting query");
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorDetail {
                detail: e.to_string(),
            }),
        ));
    }

    info!(query_len = request.query.len(), "received query");
    let response = state.orchestrator.process(&request.query).await;
    Ok(Json(response.with_debug(state.debug)))
}

/// `GET /health`
async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
    })
}
