//! HTTP server: relay webhook, health and metrics endpoints

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use prometheus::{Encoder, TextEncoder};
use serde::Serialize;
use tracing::info;

use crate::error::RequestError;
use crate::relay::RelayService;
use crate::request::RelayRequest;

pub type AppState = Arc<RelayService>;

#[derive(Debug, Serialize)]
pub struct RelayResponse {
    pub tx: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub relayer_address: String,
    pub replay_cache_entries: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/relay", post(relay))
        .route("/health", get(health_check))
        .route("/metrics", get(prometheus_metrics))
        .with_state(state)
}

fn unix_now() -> Result<u64, RequestError> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| RequestError::Internal(e.to_string()))
}

/// Webhook handler. The body is decoded by hand so that malformed or
/// incomplete requests get the same rejection as missing fields.
async fn relay(State(state): State<AppState>, body: Bytes) -> Response {
    match relay_body(&state, &body).await {
        Ok(tx) => Json(RelayResponse { tx }).into_response(),
        Err(err) => err.into_response(),
    }
}

async fn relay_body(state: &RelayService, body: &[u8]) -> Result<String, RequestError> {
    let request = match RelayRequest::from_slice(body) {
        Ok(request) => request,
        Err(err) => {
            state.metrics().record_outcome(err.outcome());
            return Err(err);
        }
    };
    state.relay(request, unix_now()?).await
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        relayer_address: state.signer(),
        replay_cache_entries: state.replay_cache_len().await,
    })
}

async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    let encoder = TextEncoder::new();
    let metric_families = state.metrics().registry.gather();
    let mut buffer = Vec::new();

    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode metrics").into_response();
    }

    ([(header::CONTENT_TYPE, encoder.format_type().to_string())], buffer).into_response()
}

pub async fn start_server(bind_address: &str, state: AppState) -> eyre::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    info!("Relayer listening on {}", listener.local_addr()?);
    info!("  POST /relay   - Relay webhook");
    info!("  GET  /health  - Health status (JSON)");
    info!("  GET  /metrics - Prometheus metrics");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
