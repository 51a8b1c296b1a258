//! Health check endpoint.
//!
//! Always answers 200; a cache outage only downgrades the reported status,
//! since reads fall back to the store.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub cache: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// GET /health - Liveness plus cache reachability.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    let (status, cache) = match state.cache.ping().await {
        Ok(()) => ("healthy", "healthy"),
        Err(err) => {
            tracing::warn!(error = %err, "Cache health check failed");
            ("degraded", "unhealthy")
        }
    };

    Json(HealthStatus {
        status,
        cache,
        timestamp: Utc::now(),
    })
}
