//! Errors surfaced by the HTTP handlers.

use crate::session::SessionError;
use axum::Json;
use axum::http::StatusCode;
use axum::http::header::InvalidHeaderValue;
use axum::response::{IntoResponse, Response};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::error;
use wordle_core::GuessError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message.
    pub error: String,
}

/// Failure while handling a game request.
#[derive(Debug, Display, Error, From)]
pub enum ApiError {
    /// The guess was rejected.
    #[display("{_0}")]
    Guess(GuessError),
    /// The session store failed.
    #[display("{_0}")]
    Session(SessionError),
    /// The session cookie could not be encoded.
    #[display("Invalid cookie header: {_0}")]
    Cookie(InvalidHeaderValue),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Guess(_) => StatusCode::BAD_REQUEST,
            ApiError::Session(_) | ApiError::Cookie(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Guess(e) => e.to_string(),
            ApiError::Session(_) | ApiError::Cookie(_) => {
                error!(error = %self, "Request failed");
                "Internal server error".to_string()
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
