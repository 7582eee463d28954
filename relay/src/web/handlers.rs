//! Form intake handlers.
//!
//! Each submission is a single independent transaction:
//! 1. Validate the method and the `message` field
//! 2. Make exactly one outbound call via the Notifier
//! 3. Redirect back to the form, or report a generic error
//!
//! Notifier failures are logged with full detail but never echoed to the
//! browser.

use std::sync::Arc;

use askama::Template;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::notify::Notifier;
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(config: Config, notifier: Notifier) -> Self {
        Self {
            config: Arc::new(config),
            notifier,
        }
    }
}

/// Build the application router.
///
/// `/send` accepts POST only; axum's method routing answers 405 for
/// anything else without touching the handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/send", post(send_message))
        .route("/health", get(health))
        .with_state(state)
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Form Page
// =============================================================================

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {}

/// Serve the message form.
pub async fn index() -> impl IntoResponse {
    IndexTemplate {}
}

// =============================================================================
// Message Submission
// =============================================================================

/// Submitted form fields.
///
/// `message` defaults to empty so an absent field and an empty field take
/// the same 400 path.
#[derive(Debug, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub message: String,
}

/// Message submission endpoint.
///
/// On success the browser is redirected back to `/` with 303 See Other so a
/// refresh re-fetches the form instead of resubmitting.
pub async fn send_message(
    State(state): State<AppState>,
    Form(form): Form<SendForm>,
) -> impl IntoResponse {
    info!(message_length = form.message.len(), "send_request_received");

    if form.message.is_empty() {
        warn!("send_message_empty");
        return (StatusCode::BAD_REQUEST, "message must not be empty").into_response();
    }

    let Some(token) = state.config.access_token.as_deref() else {
        error!("send_access_token_missing");
        return (StatusCode::INTERNAL_SERVER_ERROR, "notification service not configured")
            .into_response();
    };

    if let Err(e) = state.notifier.send(&form.message, token).await {
        // Detail stays in the logs; the browser gets a generic failure.
        error!(error = %e, "send_notify_failed");
        return (StatusCode::INTERNAL_SERVER_ERROR, "failed to send message").into_response();
    }

    info!("send_message_delivered");
    Redirect::to("/").into_response()
}
