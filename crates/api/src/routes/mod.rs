pub mod health;
pub mod notification;
pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /sessions                       list (?status, limit, offset)
/// /sessions/start-now             request an instant session (POST)
/// /sessions/request               request a scheduled session (POST)
/// /sessions/{id}                  session detail for joining (GET)
/// /sessions/{id}/accept           tutor accepts (PUT)
/// /sessions/{id}/confirm          student confirms proposed time (PUT)
/// /sessions/{id}/reject           either party rejects (PUT)
///
/// /notifications                  list (?limit, offset)
/// /notifications/mark-all-read    mark non-actionable read (PUT)
/// /notifications/unread-count     unread count (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Session negotiation.
        .nest("/sessions", session::router())
        // Notification inbox.
        .nest("/notifications", notification::router())
}
