//! Webhook rejection reasons and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Missing required parameters")]
    MissingParameters,

    #[error("Time Expired")]
    Expired,

    #[error("Invalid Hash")]
    InvalidHash,

    #[error("Request already relayed")]
    Replay,

    #[error("Unknown bridge contract: {0}")]
    UnknownContract(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Relay failed: {0}")]
    Dispatch(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RequestError {
    pub fn status(&self) -> StatusCode {
        match self {
            RequestError::MissingParameters
            | RequestError::Expired
            | RequestError::InvalidHash
            | RequestError::UnknownContract(_)
            | RequestError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            RequestError::Replay => StatusCode::CONFLICT,
            RequestError::Dispatch(_) => StatusCode::BAD_GATEWAY,
            RequestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metrics label
    pub fn outcome(&self) -> &'static str {
        match self {
            RequestError::MissingParameters => "missing_parameters",
            RequestError::Expired => "expired",
            RequestError::InvalidHash => "invalid_hash",
            RequestError::Replay => "replay",
            RequestError::UnknownContract(_) => "unknown_contract",
            RequestError::InvalidAmount(_) => "invalid_amount",
            RequestError::Dispatch(_) => "dispatch_failed",
            RequestError::Internal(_) => "internal",
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.to_string() }));
        (self.status(), body).into_response()
    }
}
