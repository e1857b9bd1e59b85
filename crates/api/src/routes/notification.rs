//! Route definitions for the `/notifications` resource.
//!
//! All endpoints require authentication.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::notification;
use crate::state::AppState;

/// Routes mounted at `/notifications`.
///
/// ```text
/// GET    /                  -> list_notifications
/// PUT    /mark-all-read     -> mark_all_read
/// GET    /unread-count      -> unread_count
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(notification::list_notifications))
        .route("/mark-all-read", put(notification::mark_all_read))
        .route("/unread-count", get(notification::unread_count))
}
