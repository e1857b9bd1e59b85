//! Repository for the `tutoring_sessions` table.

use skillhive_core::negotiation::{pending_status_names, SessionStatus};
use skillhive_core::types::{DbId, Timestamp};
use sqlx::{PgConnection, PgPool};

use crate::models::tutoring_session::{
    CreateTutoringSession, TutoringSession, UpdateNegotiation,
};
use crate::repositories::NotificationRepo;

/// Column list for `tutoring_sessions` queries.
const COLUMNS: &str = "id, student_id, tutor_id, kind, status, scheduled_time, room_name, \
                       rejection_reason, created_at, updated_at";

/// Provides create, lock and update operations for tutoring sessions.
///
/// Sessions are never deleted; rejected, cancelled and completed sessions
/// remain as history.
pub struct TutoringSessionRepo;

impl TutoringSessionRepo {
    /// Insert a new session request, returning the created row.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateTutoringSession,
    ) -> Result<TutoringSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO tutoring_sessions (student_id, tutor_id, kind, status, room_name) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TutoringSession>(&query)
            .bind(input.student_id)
            .bind(input.tutor_id)
            .bind(input.kind.as_str())
            .bind(input.status.as_str())
            .bind(&input.room_name)
            .fetch_one(conn)
            .await
    }

    /// Find a session by ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TutoringSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tutoring_sessions WHERE id = $1");
        sqlx::query_as::<_, TutoringSession>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a session by ID and lock its row until the surrounding
    /// transaction ends.
    ///
    /// Concurrent transitions on the same session queue up here, so each one
    /// evaluates its rules against the committed result of the previous one.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<TutoringSession>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tutoring_sessions WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, TutoringSession>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Find the pending session between a student and a tutor, if any.
    pub async fn find_open_between(
        conn: &mut PgConnection,
        student_id: DbId,
        tutor_id: DbId,
    ) -> Result<Option<TutoringSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tutoring_sessions \
             WHERE student_id = $1 AND tutor_id = $2 AND status = ANY($3) \
             LIMIT 1"
        );
        sqlx::query_as::<_, TutoringSession>(&query)
            .bind(student_id)
            .bind(tutor_id)
            .bind(pending_status_names())
            .fetch_optional(conn)
            .await
    }

    /// Overwrite the negotiated fields of a session, returning the updated row.
    pub async fn update_negotiation(
        conn: &mut PgConnection,
        id: DbId,
        input: &UpdateNegotiation,
    ) -> Result<TutoringSession, sqlx::Error> {
        let query = format!(
            "UPDATE tutoring_sessions SET \
                status = $2, \
                scheduled_time = $3, \
                room_name = $4, \
                rejection_reason = $5, \
                updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TutoringSession>(&query)
            .bind(id)
            .bind(input.status.as_str())
            .bind(&input.scheduled_time)
            .bind(&input.room_name)
            .bind(&input.rejection_reason)
            .fetch_one(conn)
            .await
    }

    /// List sessions where the user is the student or the tutor, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        status: Option<SessionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TutoringSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM tutoring_sessions \
             WHERE (student_id = $1 OR tutor_id = $1) \
               AND ($2::TEXT IS NULL OR status = $2) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, TutoringSession>(&query)
            .bind(user_id)
            .bind(status.map(SessionStatus::as_str))
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Cancel every session that has sat in a pending status since before
    /// `cutoff`, releasing its room and settling all of its notifications.
    ///
    /// Cancellation is silent: no participant acted, so no notice is written.
    /// Both parties see the `cancelled` status in their session list.
    ///
    /// Runs in one transaction. Returns the IDs of the cancelled sessions.
    pub async fn cancel_stale_pending(
        pool: &PgPool,
        cutoff: Timestamp,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let ids: Vec<DbId> = sqlx::query_scalar(
            "UPDATE tutoring_sessions \
             SET status = $1, room_name = NULL, updated_at = NOW() \
             WHERE status = ANY($2) AND updated_at < $3 \
             RETURNING id",
        )
        .bind(SessionStatus::Cancelled.as_str())
        .bind(pending_status_names())
        .bind(cutoff)
        .fetch_all(&mut *tx)
        .await?;

        if !ids.is_empty() {
            let settled = NotificationRepo::mark_read_for_sessions(&mut *tx, &ids).await?;
            tracing::debug!(cancelled = ids.len(), settled, "Stale pending sessions cancelled");
        }

        tx.commit().await?;
        Ok(ids)
    }
}
