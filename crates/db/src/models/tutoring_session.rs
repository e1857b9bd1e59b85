//! Tutoring session model and DTOs.

use serde::Serialize;
use skillhive_core::error::CoreError;
use skillhive_core::negotiation::{SessionKind, SessionState, SessionStatus};
use skillhive_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `tutoring_sessions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TutoringSession {
    pub id: DbId,
    pub student_id: DbId,
    pub tutor_id: DbId,
    pub kind: String,
    pub status: String,
    pub scheduled_time: Option<String>,
    pub room_name: Option<String>,
    pub rejection_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TutoringSession {
    /// Project the row onto the fields the negotiation rules operate on.
    pub fn negotiation_state(&self) -> Result<SessionState, CoreError> {
        let kind: SessionKind = self
            .kind
            .parse()
            .map_err(|e: String| CoreError::Internal(format!("session {}: {e}", self.id)))?;
        let status: SessionStatus = self
            .status
            .parse()
            .map_err(|e: String| CoreError::Internal(format!("session {}: {e}", self.id)))?;

        Ok(SessionState {
            id: self.id,
            student_id: self.student_id,
            tutor_id: self.tutor_id,
            kind,
            status,
            scheduled_time: self.scheduled_time.clone(),
            room_name: self.room_name.clone(),
        })
    }
}

/// DTO for inserting a new session request.
#[derive(Debug)]
pub struct CreateTutoringSession {
    pub student_id: DbId,
    pub tutor_id: DbId,
    pub kind: SessionKind,
    pub status: SessionStatus,
    pub room_name: Option<String>,
}

/// Replacement values for the negotiated fields of a session.
#[derive(Debug)]
pub struct UpdateNegotiation {
    pub status: SessionStatus,
    pub scheduled_time: Option<String>,
    pub room_name: Option<String>,
    pub rejection_reason: Option<String>,
}
