//! # jotter-api
//!
//! HTTP server for jotter.
//!
//! Every note route sits behind the session gate ([`session::RequireUser`]);
//! mutations are routed by their `intent` field and answered with a
//! `303 See Other` redirect.

pub mod config;
pub mod error;
pub mod handlers;
pub mod session;
pub mod state;

use axum::{
    extract::Request,
    routing::{get, post},
    Router,
};
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use handlers::{auth, health, notes};

pub use config::{ApiConfig, AuthSettings, ConfigError};
pub use error::ApiError;
pub use state::AppState;

/// Request ID generator producing UUIDv7 values.
#[derive(Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// Build the application router.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(health::healthz))
        .route("/notes", get(notes::list_notes).post(notes::notes_action))
        .route("/notes/new", post(notes::new_note_action))
        .route("/notes/:id", get(notes::get_note).post(notes::note_action))
        .route("/logout", post(auth::logout))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                    user_id = tracing::field::Empty,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .with_state(state)
}
