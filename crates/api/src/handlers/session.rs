//! Handlers for the `/sessions` resource.
//!
//! Thin HTTP bindings over [`SessionCoordinator`](crate::negotiation::SessionCoordinator).
//! All endpoints require authentication via [`AuthUser`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use skillhive_core::error::CoreError;
use skillhive_core::negotiation::SessionStatus;
use skillhive_core::types::DbId;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / query types
// ---------------------------------------------------------------------------

/// Body of `POST /sessions/start-now` and `POST /sessions/request`.
#[derive(Debug, Deserialize)]
pub struct SessionRequestBody {
    pub tutor_id: DbId,
}

/// Body of `PUT /sessions/{id}/accept`. The time is required for scheduled
/// sessions and ignored for instant ones.
#[derive(Debug, Default, Deserialize)]
pub struct AcceptSessionBody {
    pub scheduled_time: Option<String>,
}

/// Body of `PUT /sessions/{id}/reject`.
#[derive(Debug, Default, Deserialize)]
pub struct RejectSessionBody {
    pub reason: Option<String>,
}

/// Query parameters for `GET /sessions`.
#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    /// Restrict to one status, e.g. `confirmed`.
    pub status: Option<String>,
    /// Maximum number of results. Defaults to 50, capped at 100.
    pub limit: Option<i64>,
    /// Number of results to skip. Defaults to 0.
    pub offset: Option<i64>,
}

const MAX_LIMIT: i64 = 100;
const DEFAULT_LIMIT: i64 = 50;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// POST /api/v1/sessions/start-now
///
/// Request an instant session with a tutor.
pub async fn start_now(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SessionRequestBody>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .coordinator
        .create_instant_session(auth.user_id, input.tutor_id)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

/// POST /api/v1/sessions/request
///
/// Request a scheduled session with a tutor.
pub async fn request_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SessionRequestBody>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .coordinator
        .create_scheduled_session(auth.user_id, input.tutor_id)
        .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: session })))
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// PUT /api/v1/sessions/{id}/accept
pub async fn accept_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
    body: Option<Json<AcceptSessionBody>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let session = state
        .coordinator
        .accept_session(auth.user_id, session_id, input.scheduled_time.as_deref())
        .await?;

    Ok(Json(DataResponse { data: session }))
}

/// PUT /api/v1/sessions/{id}/confirm
pub async fn confirm_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .coordinator
        .confirm_session(auth.user_id, session_id)
        .await?;

    Ok(Json(DataResponse { data: session }))
}

/// PUT /api/v1/sessions/{id}/reject
pub async fn reject_session(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
    body: Option<Json<RejectSessionBody>>,
) -> AppResult<impl IntoResponse> {
    let input = body.map(|Json(b)| b).unwrap_or_default();
    let session = state
        .coordinator
        .reject_session(auth.user_id, session_id, input.reason.as_deref())
        .await?;

    Ok(Json(DataResponse { data: session }))
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/sessions/{id}
///
/// Session detail for the meeting page. Fails unless the caller is a
/// participant and the session is confirmed with a room.
pub async fn get_session_for_join(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(session_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let session = state
        .coordinator
        .get_session_for_join(auth.user_id, session_id)
        .await?;

    Ok(Json(DataResponse { data: session }))
}

/// GET /api/v1/sessions
///
/// The caller's sessions (as student or tutor), newest first.
pub async fn list_sessions(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<SessionListQuery>,
) -> AppResult<impl IntoResponse> {
    let status = params
        .status
        .as_deref()
        .map(str::parse::<SessionStatus>)
        .transpose()
        .map_err(CoreError::Validation)?;
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let sessions = state
        .coordinator
        .list_sessions(auth.user_id, status, limit, offset)
        .await?;

    Ok(Json(DataResponse { data: sessions }))
}
