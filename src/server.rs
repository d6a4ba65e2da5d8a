//! HTTP surface: `POST /check` and `POST /restart`.

use crate::error::ApiError;
use crate::game::{CheckOutcome, GameService};
use crate::identity::ClientSession;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{info, instrument, warn};
use wordle_core::Feedback;

/// Body of `POST /check`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckRequest {
    /// The guess, any case. A missing field is an empty guess.
    #[serde(default)]
    pub guess: String,
}

/// Successful response of `POST /check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Per-letter verdicts.
    pub feedback: Vec<Feedback>,
    /// Whether the game is over.
    #[serde(rename = "gameOver")]
    pub game_over: bool,
}

impl From<CheckOutcome> for CheckResponse {
    fn from(outcome: CheckOutcome) -> Self {
        Self {
            game_over: outcome.game_over(),
            feedback: outcome.feedback().to_vec(),
        }
    }
}

/// Response of `POST /restart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestartResponse {
    /// Confirmation text.
    pub message: String,
}

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    game: Arc<GameService>,
    cookie_name: Arc<str>,
}

impl AppState {
    /// Creates handler state.
    pub fn new(game: GameService, cookie_name: &str) -> Self {
        Self {
            game: Arc::new(game),
            cookie_name: Arc::from(cookie_name),
        }
    }

    /// The game service.
    pub fn game(&self) -> &GameService {
        &self.game
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/check", post(check))
        .route("/restart", post(restart))
        .layer(ServiceBuilder::new().layer(middleware::from_fn(log_requests)))
        .with_state(state)
}

#[instrument(skip_all)]
async fn check(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CheckRequest>,
) -> Result<Response, ApiError> {
    let client = ClientSession::resolve(&headers, &state.cookie_name);
    let response = match state.game.check(client.id(), &request.guess) {
        Ok(outcome) => Json(CheckResponse::from(outcome)).into_response(),
        Err(e) => e.into_response(),
    };
    Ok(client.attach(response, &state.cookie_name)?)
}

#[instrument(skip_all)]
async fn restart(State(state): State<AppState>, headers: HeaderMap) -> Result<Response, ApiError> {
    let client = ClientSession::resolve(&headers, &state.cookie_name);
    let response = match state.game.restart(client.id()) {
        Ok(()) => Json(RestartResponse {
            message: "Game restarted".to_string(),
        })
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    };
    Ok(client.attach(response, &state.cookie_name)?)
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    info!(method = %method, uri = %uri, "Incoming HTTP request");

    let response = next.run(request).await;
    let status = response.status();
    if status.is_server_error() {
        warn!(status = %status, uri = %uri, "Request failed");
    } else {
        info!(status = %status, uri = %uri, "Response sent");
    }
    response
}
