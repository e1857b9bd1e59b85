//! Notification side-channel of the negotiation protocol.
//!
//! The emitter only reacts to transitions: it writes the notice a transition
//! produced and settles the notifications that transition resolved. It never
//! changes session state.

use skillhive_core::negotiation::{Notice, Settle};
use skillhive_core::types::DbId;
use skillhive_db::models::notification::{CreateNotification, Notification};
use skillhive_db::repositories::NotificationRepo;
use skillhive_db::DbPool;
use sqlx::PgConnection;

pub struct NotificationEmitter;

impl NotificationEmitter {
    /// Write one notification for `notice`, tied to `session_id`.
    pub async fn emit(
        conn: &mut PgConnection,
        notice: &Notice,
        session_id: DbId,
    ) -> Result<Notification, sqlx::Error> {
        let input = CreateNotification {
            recipient_id: notice.recipient_id,
            sender_id: notice.sender_id,
            kind: notice.kind,
            message: notice.message.clone(),
            session_id: Some(session_id),
        };
        let notification = NotificationRepo::create(conn, &input).await?;

        tracing::debug!(
            notification_id = notification.id,
            recipient_id = notice.recipient_id,
            kind = %notice.kind,
            session_id,
            "Notification emitted"
        );

        Ok(notification)
    }

    /// Mark read the notifications of `session_id` selected by `settle`.
    /// Returns the number of notifications that flipped to read.
    pub async fn settle(
        conn: &mut PgConnection,
        session_id: DbId,
        settle: Settle,
    ) -> Result<u64, sqlx::Error> {
        match settle {
            Settle::Kinds {
                recipient_id,
                kinds,
            } => {
                NotificationRepo::mark_read_for_session_kinds(conn, session_id, recipient_id, kinds)
                    .await
            }
            Settle::AllForSession => {
                NotificationRepo::mark_read_for_sessions(conn, &[session_id]).await
            }
        }
    }

    /// Bulk inbox sweep: mark read everything the user has that does not
    /// await a decision. Idempotent.
    pub async fn mark_all_non_actionable_read(
        pool: &DbPool,
        user_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let count = NotificationRepo::mark_all_non_actionable_read(pool, user_id).await?;
        tracing::debug!(user_id, marked_read = count, "Non-actionable notifications marked read");
        Ok(count)
    }
}
