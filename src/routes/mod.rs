//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! JSON API over the friend record and session marker. Every handler parses
//! its slot from the path (or body) first, so an unknown slot is rejected
//! before any state is read or written.

pub mod friends;
pub mod session;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, patch, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::model::Slot;
use crate::services::store::StoreError;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/friends", get(friends::list_friends))
        .route("/api/friends/{slot}", get(friends::get_friend))
        .route("/api/friends/{slot}/profile", patch(friends::update_profile))
        .route("/api/friends/{slot}/status", post(friends::post_status))
        .route("/api/friends/{slot}/history", get(friends::history))
        .route("/api/friends/{slot}/suggestion", post(friends::suggest_status))
        .route(
            "/api/session",
            get(session::get_session)
                .put(session::set_session)
                .delete(session::clear_session),
        )
        .route("/api/session/login", post(session::login))
        .route("/api/login-options", get(session::login_options))
        .route("/api/dashboard", get(session::dashboard))
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Parse a slot id from a path segment or request body.
pub(crate) fn parse_slot(raw: &str) -> Result<Slot, ApiError> {
    raw.parse::<Slot>()
        .map_err(|e| ApiError::Store(StoreError::from(e)))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
