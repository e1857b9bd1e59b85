//! Notification entity models and DTOs.

use serde::Serialize;
use skillhive_core::notification_kind::NotificationKind;
use skillhive_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `notifications` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub recipient_id: DbId,
    pub sender_id: DbId,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub session_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// A notification joined with a summary of its sender, for inbox display.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationWithSender {
    pub id: DbId,
    pub recipient_id: DbId,
    pub sender_id: DbId,
    pub sender_name: String,
    pub sender_profile_pic: String,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub read_at: Option<Timestamp>,
    pub session_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for writing a notification.
#[derive(Debug)]
pub struct CreateNotification {
    pub recipient_id: DbId,
    pub sender_id: DbId,
    pub kind: NotificationKind,
    pub message: String,
    pub session_id: Option<DbId>,
}
