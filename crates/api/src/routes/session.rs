//! Route definitions for the `/sessions` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Routes mounted at `/sessions`.
///
/// ```text
/// GET    /                 -> list_sessions
/// POST   /start-now        -> start_now
/// POST   /request          -> request_session
/// GET    /{id}             -> get_session_for_join
/// PUT    /{id}/accept      -> accept_session
/// PUT    /{id}/confirm     -> confirm_session
/// PUT    /{id}/reject      -> reject_session
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(session::list_sessions))
        .route("/start-now", post(session::start_now))
        .route("/request", post(session::request_session))
        .route("/{id}", get(session::get_session_for_join))
        .route("/{id}/accept", put(session::accept_session))
        .route("/{id}/confirm", put(session::confirm_session))
        .route("/{id}/reject", put(session::reject_session))
}
