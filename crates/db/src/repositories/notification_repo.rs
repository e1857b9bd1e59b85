//! Repository for the `notifications` table.

use chrono::Utc;
use skillhive_core::notification_kind::{kind_names, NotificationKind, ACTIONABLE_KINDS};
use skillhive_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::notification::{CreateNotification, Notification, NotificationWithSender};

/// Column list for `notifications` queries.
const COLUMNS: &str =
    "id, recipient_id, sender_id, message, kind, is_read, read_at, session_id, created_at";

/// Provides create, read-model and mark-read operations for notifications.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Write a notification, returning the created row.
    ///
    /// `created_at` is taken from the application clock rather than `NOW()`,
    /// so that notifications written in one transaction keep their write
    /// order under `ORDER BY created_at`.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateNotification,
    ) -> Result<Notification, sqlx::Error> {
        let query = format!(
            "INSERT INTO notifications (recipient_id, sender_id, message, kind, session_id, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(input.recipient_id)
            .bind(input.sender_id)
            .bind(&input.message)
            .bind(input.kind.as_str())
            .bind(input.session_id)
            .bind(Utc::now())
            .fetch_one(conn)
            .await
    }

    /// Mark read a recipient's unread notifications of the given kinds for one
    /// session. Returns the number of rows updated.
    pub async fn mark_read_for_session_kinds(
        conn: &mut PgConnection,
        session_id: DbId,
        recipient_id: DbId,
        kinds: &[NotificationKind],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE session_id = $1 AND recipient_id = $2 AND is_read = false \
               AND kind = ANY($3)",
        )
        .bind(session_id)
        .bind(recipient_id)
        .bind(kind_names(kinds))
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// Mark read every unread notification tied to any of `session_ids`,
    /// regardless of recipient or kind. Returns the number of rows updated.
    pub async fn mark_read_for_sessions(
        conn: &mut PgConnection,
        session_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE session_id = ANY($1) AND is_read = false",
        )
        .bind(session_ids)
        .execute(conn)
        .await?;
        Ok(result.rows_affected())
    }

    /// List a user's notifications, newest first, with the sender's name and
    /// picture reference.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<NotificationWithSender>, sqlx::Error> {
        sqlx::query_as::<_, NotificationWithSender>(
            "SELECT n.id, n.recipient_id, n.sender_id, \
                    u.name AS sender_name, u.profile_pic AS sender_profile_pic, \
                    n.message, n.kind, n.is_read, n.read_at, n.session_id, n.created_at \
             FROM notifications n \
             JOIN users u ON u.id = n.sender_id \
             WHERE n.recipient_id = $1 \
             ORDER BY n.created_at DESC, n.id DESC \
             LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
    }

    /// List every notification tied to a session, oldest first.
    pub async fn list_for_session(
        pool: &PgPool,
        session_id: DbId,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE session_id = $1 \
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(session_id)
            .fetch_all(pool)
            .await
    }

    /// Mark all of a user's unread, non-actionable notifications as read.
    ///
    /// Actionable kinds (requests, proposals, join prompts) are left alone;
    /// they are settled only by the session transition that resolves them.
    /// Returns the number of notifications that were marked read, so a
    /// repeated call returns 0.
    pub async fn mark_all_non_actionable_read(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notifications \
             SET is_read = true, read_at = NOW() \
             WHERE recipient_id = $1 AND is_read = false \
               AND NOT (kind = ANY($2))",
        )
        .bind(user_id)
        .bind(kind_names(ACTIONABLE_KINDS))
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Get the number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE recipient_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }
}
