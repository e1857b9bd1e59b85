//! Notification kinds emitted by the session negotiation protocol.
//!
//! A kind is *actionable* when the recipient must resolve it through a
//! session transition (accept, confirm, reject, join). Actionable
//! notifications are never consumed by the bulk mark-all-read sweep.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A scheduled session was requested.
    SessionRequest,
    /// An instant session was requested.
    SessionStartNow,
    /// The tutor accepted a scheduled request and proposed a time.
    SessionTimeProposed,
    /// The student confirmed the proposed time.
    SessionConfirmed,
    /// Either party rejected the session.
    SessionRejected,
    /// The tutor accepted an instant request; the room is ready.
    SessionJoinNow,
}

/// Kinds that only a session transition may mark read.
pub const ACTIONABLE_KINDS: &[NotificationKind] = &[
    NotificationKind::SessionRequest,
    NotificationKind::SessionStartNow,
    NotificationKind::SessionTimeProposed,
    NotificationKind::SessionJoinNow,
];

/// Kinds that answer a tutor's incoming request (settled on accept).
pub const REQUEST_KINDS: &[NotificationKind] = &[
    NotificationKind::SessionRequest,
    NotificationKind::SessionStartNow,
];

/// Kinds settled when the student confirms a proposed time.
pub const PROPOSAL_KINDS: &[NotificationKind] = &[NotificationKind::SessionTimeProposed];

impl NotificationKind {
    pub const ALL: [NotificationKind; 6] = [
        NotificationKind::SessionRequest,
        NotificationKind::SessionStartNow,
        NotificationKind::SessionTimeProposed,
        NotificationKind::SessionConfirmed,
        NotificationKind::SessionRejected,
        NotificationKind::SessionJoinNow,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::SessionRequest => "session_request",
            NotificationKind::SessionStartNow => "session_start_now",
            NotificationKind::SessionTimeProposed => "session_time_proposed",
            NotificationKind::SessionConfirmed => "session_confirmed",
            NotificationKind::SessionRejected => "session_rejected",
            NotificationKind::SessionJoinNow => "session_join_now",
        }
    }

    pub fn is_actionable(self) -> bool {
        ACTIONABLE_KINDS.contains(&self)
    }
}

/// Database names of a set of kinds, for binding as a `TEXT[]` parameter.
pub fn kind_names(kinds: &[NotificationKind]) -> Vec<&'static str> {
    kinds.iter().map(|k| k.as_str()).collect()
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotificationKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown notification kind '{s}'"))
    }
}
