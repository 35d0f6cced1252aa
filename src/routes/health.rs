//! Health check endpoint
//!
//! Liveness probe: returns 200 whenever the gateway is running, regardless
//! of store reachability. A store outage degrades the archive to its last
//! snapshot; it does not take the service down.

use bytes::Bytes;
use http_body_util::Full;
use hyper::{Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::routes::json_response;
use crate::server::AppState;

/// Health response body
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall health status (true if the service is running)
    pub healthy: bool,
    /// Service version
    pub version: &'static str,
    /// Uptime in seconds
    pub uptime: u64,
    /// Recompute epoch of the current snapshot (0 before first build)
    pub epoch: u64,
    /// Number of profiles in the current snapshot
    pub profiles: usize,
    /// Operating mode
    pub mode: &'static str,
    /// Current timestamp
    pub timestamp: String,
}

/// Handle GET /health
pub async fn health_check(state: Arc<AppState>) -> Response<Full<Bytes>> {
    let snapshot = state.archive.current().await;

    let response = HealthResponse {
        healthy: true,
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.started_at.elapsed().as_secs(),
        epoch: snapshot.epoch,
        profiles: snapshot.profiles.len(),
        mode: if state.args.dev_mode { "development" } else { "production" },
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    json_response(StatusCode::OK, &response)
}
