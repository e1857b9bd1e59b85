//! Tutoring session negotiation rules.
//!
//! A session moves through these statuses:
//!
//! ```text
//!                          accept (instant)
//! pending_tutor_approval ------------------------------------> confirmed
//!    |     |                                                     ^    |
//!    |     | accept (scheduled)                        confirm   |    |
//!    |     +-----------> pending_student_approval ---------------+    |
//!    |                             |                                  |
//!    | reject                      | reject                    reject |
//!    v                             v                                  v
//! rejected                      rejected                          rejected
//! ```
//!
//! Either participant may reject until the session reaches a terminal
//! status. `completed` and `cancelled` are terminal statuses outside the
//! request flow (`cancelled` is reached through pending-session expiry).
//!
//! The functions here are pure. Each one checks the caller's relationship to
//! the session and the current status, and returns a [`Transition`]
//! describing the new session fields, the [`Notice`] for the counterpart,
//! and which notifications the transition settles. The DB layer persists a
//! transition atomically.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::identity::{Party, UserType};
use crate::notification_kind::{NotificationKind, PROPOSAL_KINDS, REQUEST_KINDS};
use crate::types::DbId;

/// Prefix of room names allocated when an instant session is requested.
pub const INSTANT_ROOM_PREFIX: &str = "SkillHive_Instant_";

/// Prefix of room names allocated when a scheduled session is confirmed.
pub const SCHEDULED_ROOM_PREFIX: &str = "SkillHive_Session_";

/// Maximum length of a rejection reason, in characters.
pub const MAX_REASON_LEN: usize = 500;

/// Maximum length of a proposed time string, in characters.
pub const MAX_SCHEDULED_TIME_LEN: usize = 100;

// ---------------------------------------------------------------------------
// Status and kind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    PendingTutorApproval,
    PendingStudentApproval,
    Confirmed,
    Rejected,
    Completed,
    Cancelled,
}

/// Statuses in which a session still awaits a decision.
pub const PENDING_STATUSES: &[SessionStatus] = &[
    SessionStatus::PendingTutorApproval,
    SessionStatus::PendingStudentApproval,
];

impl SessionStatus {
    pub const ALL: [SessionStatus; 6] = [
        SessionStatus::PendingTutorApproval,
        SessionStatus::PendingStudentApproval,
        SessionStatus::Confirmed,
        SessionStatus::Rejected,
        SessionStatus::Completed,
        SessionStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::PendingTutorApproval => "pending_tutor_approval",
            SessionStatus::PendingStudentApproval => "pending_student_approval",
            SessionStatus::Confirmed => "confirmed",
            SessionStatus::Rejected => "rejected",
            SessionStatus::Completed => "completed",
            SessionStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_pending(self) -> bool {
        PENDING_STATUSES.contains(&self)
    }

    /// Terminal statuses admit no further transition, not even a reject.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SessionStatus::Rejected | SessionStatus::Completed | SessionStatus::Cancelled
        )
    }
}

/// Database names of the pending statuses, for binding as a `TEXT[]` parameter.
pub fn pending_status_names() -> Vec<&'static str> {
    PENDING_STATUSES.iter().map(|s| s.as_str()).collect()
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SessionStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Unknown session status '{s}'"))
    }
}

/// How a session was requested. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    /// Start now: the room is allocated with the request, accept goes
    /// straight to `confirmed`.
    Instant,
    /// The tutor proposes a time and the student confirms it.
    Scheduled,
}

impl SessionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionKind::Instant => "instant",
            SessionKind::Scheduled => "scheduled",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "instant" => Ok(SessionKind::Instant),
            "scheduled" => Ok(SessionKind::Scheduled),
            other => Err(format!("Unknown session kind '{other}'")),
        }
    }
}

// ---------------------------------------------------------------------------
// State and plans
// ---------------------------------------------------------------------------

/// The negotiation-relevant fields of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub id: DbId,
    pub student_id: DbId,
    pub tutor_id: DbId,
    pub kind: SessionKind,
    pub status: SessionStatus,
    pub scheduled_time: Option<String>,
    pub room_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    Student,
    Tutor,
}

impl SessionState {
    /// The caller's role in this session, if any.
    pub fn role_of(&self, user_id: DbId) -> Option<ParticipantRole> {
        if user_id == self.student_id {
            Some(ParticipantRole::Student)
        } else if user_id == self.tutor_id {
            Some(ParticipantRole::Tutor)
        } else {
            None
        }
    }

    pub fn has_room(&self) -> bool {
        self.room_name.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// A room exists exactly when the session is confirmed, or is an instant
    /// request still waiting for the tutor.
    pub fn room_invariant_holds(&self) -> bool {
        let expects_room = self.status == SessionStatus::Confirmed
            || (self.kind == SessionKind::Instant
                && self.status == SessionStatus::PendingTutorApproval);
        self.has_room() == expects_room
    }
}

/// A notification to write for the counterpart of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub recipient_id: DbId,
    pub sender_id: DbId,
    pub kind: NotificationKind,
    pub message: String,
}

/// Which existing notifications a transition marks read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// The recipient's unread notifications of these kinds for the session.
    Kinds {
        recipient_id: DbId,
        kinds: &'static [NotificationKind],
    },
    /// Every unread notification tied to the session, whoever received it.
    AllForSession,
}

/// The outcome of a legal transition. Field values replace the stored ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub status: SessionStatus,
    pub scheduled_time: Option<String>,
    pub room_name: Option<String>,
    pub rejection_reason: Option<String>,
    pub notice: Notice,
    pub settle: Settle,
}

impl Transition {
    /// Apply the session-field part of this transition to `state`.
    pub fn apply_to(&self, state: &mut SessionState) {
        state.status = self.status;
        state.scheduled_time = self.scheduled_time.clone();
        state.room_name = self.room_name.clone();
    }
}

/// What to create for a new session request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan {
    pub kind: SessionKind,
    pub status: SessionStatus,
    pub room_name: Option<String>,
    pub notice: Notice,
}

// ---------------------------------------------------------------------------
// Room names
// ---------------------------------------------------------------------------

/// A fresh, unguessable room name for an instant session.
pub fn instant_room_name() -> String {
    format!("{INSTANT_ROOM_PREFIX}{}", uuid::Uuid::new_v4().simple())
}

/// The deterministic room name of a confirmed scheduled session.
pub fn scheduled_room_name(session_id: DbId) -> String {
    format!("{SCHEDULED_ROOM_PREFIX}{session_id}")
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Validate the tutor targeted by a request.
///
/// `tutor_type` is `None` when no user with `tutor_id` exists. A user who
/// cannot teach is reported the same way as a missing one. The same policy
/// applies to instant and scheduled requests.
pub fn validate_target(
    student_id: DbId,
    tutor_id: DbId,
    tutor_type: Option<UserType>,
) -> Result<(), CoreError> {
    if student_id == tutor_id {
        return Err(CoreError::InvalidTarget(
            "You cannot request a session with yourself".into(),
        ));
    }
    match tutor_type {
        Some(t) if t.can_teach() => Ok(()),
        _ => Err(CoreError::NotFound {
            entity: "Tutor",
            id: tutor_id,
        }),
    }
}

/// Plan a new session request from `student` to `tutor_id`.
///
/// The target must already have passed [`validate_target`].
pub fn plan_request(student: &Party, tutor_id: DbId, kind: SessionKind) -> RequestPlan {
    let (room_name, notice_kind, message) = match kind {
        SessionKind::Instant => (
            Some(instant_room_name()),
            NotificationKind::SessionStartNow,
            format!("{} wants to start a session with you right now!", student.name),
        ),
        SessionKind::Scheduled => (
            None,
            NotificationKind::SessionRequest,
            format!("{} has requested a scheduled session.", student.name),
        ),
    };

    RequestPlan {
        kind,
        status: SessionStatus::PendingTutorApproval,
        room_name,
        notice: Notice {
            recipient_id: tutor_id,
            sender_id: student.id,
            kind: notice_kind,
            message,
        },
    }
}

/// The tutor accepts a pending request.
///
/// The status check comes first: accepting a session that is not awaiting
/// the tutor fails with `InvalidState` whoever the caller is.
pub fn plan_accept(
    state: &SessionState,
    caller: &Party,
    scheduled_time: Option<&str>,
) -> Result<Transition, CoreError> {
    if state.status != SessionStatus::PendingTutorApproval {
        return Err(CoreError::InvalidState(format!(
            "Cannot accept a session that is {}",
            state.status
        )));
    }
    if caller.id != state.tutor_id {
        return Err(CoreError::Forbidden(
            "Only the session's tutor can accept it".into(),
        ));
    }

    let settle = Settle::Kinds {
        recipient_id: state.tutor_id,
        kinds: REQUEST_KINDS,
    };

    match state.kind {
        SessionKind::Instant => Ok(Transition {
            status: SessionStatus::Confirmed,
            scheduled_time: state.scheduled_time.clone(),
            room_name: state.room_name.clone(),
            rejection_reason: None,
            notice: Notice {
                recipient_id: state.student_id,
                sender_id: state.tutor_id,
                kind: NotificationKind::SessionJoinNow,
                message: format!(
                    "{} has accepted your request! Click here to join the session now.",
                    caller.name
                ),
            },
            settle,
        }),
        SessionKind::Scheduled => {
            let time = scheduled_time
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .ok_or_else(|| {
                    CoreError::MissingInput("Please provide a scheduled time".into())
                })?;
            if time.chars().count() > MAX_SCHEDULED_TIME_LEN {
                return Err(CoreError::Validation(format!(
                    "Scheduled time must be at most {MAX_SCHEDULED_TIME_LEN} characters"
                )));
            }

            Ok(Transition {
                status: SessionStatus::PendingStudentApproval,
                scheduled_time: Some(time.to_string()),
                room_name: None,
                rejection_reason: None,
                notice: Notice {
                    recipient_id: state.student_id,
                    sender_id: state.tutor_id,
                    kind: NotificationKind::SessionTimeProposed,
                    message: format!(
                        "{} accepted your request and proposed a time: {time}",
                        caller.name
                    ),
                },
                settle,
            })
        }
    }
}

/// The student confirms the time the tutor proposed.
pub fn plan_confirm(state: &SessionState, caller: &Party) -> Result<Transition, CoreError> {
    if caller.id != state.student_id {
        return Err(CoreError::Forbidden(
            "Only the session's student can confirm it".into(),
        ));
    }
    if state.status != SessionStatus::PendingStudentApproval {
        return Err(CoreError::InvalidState(
            "This session is not awaiting your confirmation".into(),
        ));
    }

    let when = state.scheduled_time.as_deref().unwrap_or("the proposed time");

    Ok(Transition {
        status: SessionStatus::Confirmed,
        scheduled_time: state.scheduled_time.clone(),
        room_name: Some(scheduled_room_name(state.id)),
        rejection_reason: None,
        notice: Notice {
            recipient_id: state.tutor_id,
            sender_id: state.student_id,
            kind: NotificationKind::SessionConfirmed,
            message: format!("{} has confirmed the session for {when}.", caller.name),
        },
        settle: Settle::Kinds {
            recipient_id: state.student_id,
            kinds: PROPOSAL_KINDS,
        },
    })
}

/// Either participant rejects (or calls off) a session that has not reached
/// a terminal status. A confirmed session may still be called off.
///
/// The room is released, and every notification of the session is settled.
pub fn plan_reject(
    state: &SessionState,
    caller: &Party,
    reason: Option<&str>,
) -> Result<Transition, CoreError> {
    let recipient_id = match state.role_of(caller.id) {
        Some(ParticipantRole::Student) => state.tutor_id,
        Some(ParticipantRole::Tutor) => state.student_id,
        None => {
            return Err(CoreError::Forbidden(
                "Only a participant can reject this session".into(),
            ))
        }
    };
    if state.status.is_terminal() {
        return Err(CoreError::InvalidState(format!(
            "Cannot reject a session that is {}",
            state.status
        )));
    }

    let reason = reason.map(str::trim).filter(|r| !r.is_empty());
    if let Some(r) = reason {
        if r.chars().count() > MAX_REASON_LEN {
            return Err(CoreError::Validation(format!(
                "Reason must be at most {MAX_REASON_LEN} characters"
            )));
        }
    }

    let message = match reason {
        Some(r) => format!("{} has rejected the session. Reason: \"{r}\"", caller.name),
        None => format!("{} has rejected the session.", caller.name),
    };

    Ok(Transition {
        status: SessionStatus::Rejected,
        scheduled_time: state.scheduled_time.clone(),
        room_name: None,
        rejection_reason: reason.map(str::to_string),
        notice: Notice {
            recipient_id,
            sender_id: caller.id,
            kind: NotificationKind::SessionRejected,
            message,
        },
        settle: Settle::AllForSession,
    })
}

/// Check that `caller_id` may join the session's video room now.
///
/// Non-participants are refused before the status is looked at.
pub fn check_joinable(state: &SessionState, caller_id: DbId) -> Result<(), CoreError> {
    if state.role_of(caller_id).is_none() {
        return Err(CoreError::Forbidden(
            "You are not authorized to join this session".into(),
        ));
    }
    if state.status != SessionStatus::Confirmed || !state.has_room() {
        return Err(CoreError::InvalidState(
            "This session is not yet confirmed".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const STUDENT: DbId = 1;
    const TUTOR: DbId = 2;
    const STRANGER: DbId = 3;

    fn student() -> Party {
        Party::new(STUDENT, "Ada")
    }

    fn tutor() -> Party {
        Party::new(TUTOR, "Grace")
    }

    fn stranger() -> Party {
        Party::new(STRANGER, "Mallory")
    }

    fn requested(kind: SessionKind) -> SessionState {
        let plan = plan_request(&student(), TUTOR, kind);
        SessionState {
            id: 42,
            student_id: STUDENT,
            tutor_id: TUTOR,
            kind: plan.kind,
            status: plan.status,
            scheduled_time: None,
            room_name: plan.room_name,
        }
    }

    fn advanced(mut state: SessionState, transition: &Transition) -> SessionState {
        transition.apply_to(&mut state);
        state
    }

    // -- requests ---------------------------------------------------------

    #[test]
    fn self_request_is_invalid_target() {
        let err = validate_target(STUDENT, STUDENT, Some(UserType::Both)).unwrap_err();
        assert_matches!(err, CoreError::InvalidTarget(_));
    }

    #[test]
    fn missing_tutor_is_not_found() {
        let err = validate_target(STUDENT, 99, None).unwrap_err();
        assert_matches!(err, CoreError::NotFound { entity: "Tutor", id: 99 });
    }

    #[test]
    fn study_only_tutor_is_not_found() {
        let err = validate_target(STUDENT, TUTOR, Some(UserType::Study)).unwrap_err();
        assert_matches!(
            err,
            CoreError::NotFound {
                entity: "Tutor",
                id: TUTOR
            }
        );
    }

    #[test]
    fn teaching_tutor_is_valid() {
        assert!(validate_target(STUDENT, TUTOR, Some(UserType::Teach)).is_ok());
        assert!(validate_target(STUDENT, TUTOR, Some(UserType::Both)).is_ok());
    }

    #[test]
    fn instant_request_allocates_room_and_notifies_tutor() {
        let plan = plan_request(&student(), TUTOR, SessionKind::Instant);
        assert_eq!(plan.status, SessionStatus::PendingTutorApproval);
        let room = plan.room_name.expect("instant request must carry a room");
        assert!(room.starts_with(INSTANT_ROOM_PREFIX));
        assert!(room.len() > INSTANT_ROOM_PREFIX.len());
        assert_eq!(plan.notice.recipient_id, TUTOR);
        assert_eq!(plan.notice.sender_id, STUDENT);
        assert_eq!(plan.notice.kind, NotificationKind::SessionStartNow);
        assert_eq!(
            plan.notice.message,
            "Ada wants to start a session with you right now!"
        );
    }

    #[test]
    fn instant_rooms_are_unique() {
        assert_ne!(instant_room_name(), instant_room_name());
    }

    #[test]
    fn scheduled_request_has_no_room() {
        let plan = plan_request(&student(), TUTOR, SessionKind::Scheduled);
        assert_eq!(plan.room_name, None);
        assert_eq!(plan.notice.kind, NotificationKind::SessionRequest);
        assert_eq!(plan.notice.message, "Ada has requested a scheduled session.");
    }

    #[test]
    fn new_requests_satisfy_room_invariant() {
        assert!(requested(SessionKind::Instant).room_invariant_holds());
        assert!(requested(SessionKind::Scheduled).room_invariant_holds());
    }

    // -- accept -----------------------------------------------------------

    #[test]
    fn accepting_instant_session_confirms_it() {
        let state = requested(SessionKind::Instant);
        let t = plan_accept(&state, &tutor(), None).unwrap();

        assert_eq!(t.status, SessionStatus::Confirmed);
        assert_eq!(t.room_name, state.room_name);
        assert_eq!(t.notice.kind, NotificationKind::SessionJoinNow);
        assert_eq!(t.notice.recipient_id, STUDENT);
        assert_eq!(
            t.settle,
            Settle::Kinds {
                recipient_id: TUTOR,
                kinds: REQUEST_KINDS
            }
        );
        assert!(advanced(state, &t).room_invariant_holds());
    }

    #[test]
    fn accepting_scheduled_session_proposes_time() {
        let state = requested(SessionKind::Scheduled);
        let t = plan_accept(&state, &tutor(), Some(" 2025-03-01T10:00 ")).unwrap();

        assert_eq!(t.status, SessionStatus::PendingStudentApproval);
        assert_eq!(t.scheduled_time.as_deref(), Some("2025-03-01T10:00"));
        assert_eq!(t.room_name, None);
        assert_eq!(t.notice.kind, NotificationKind::SessionTimeProposed);
        assert_eq!(
            t.notice.message,
            "Grace accepted your request and proposed a time: 2025-03-01T10:00"
        );
        assert!(advanced(state, &t).room_invariant_holds());
    }

    #[test]
    fn accepting_scheduled_session_without_time_is_missing_input() {
        let state = requested(SessionKind::Scheduled);
        assert_matches!(
            plan_accept(&state, &tutor(), None),
            Err(CoreError::MissingInput(_))
        );
        assert_matches!(
            plan_accept(&state, &tutor(), Some("   ")),
            Err(CoreError::MissingInput(_))
        );
    }

    #[test]
    fn instant_accept_ignores_supplied_time() {
        let state = requested(SessionKind::Instant);
        let t = plan_accept(&state, &tutor(), Some("tomorrow")).unwrap();
        assert_eq!(t.scheduled_time, None);
    }

    #[test]
    fn only_tutor_may_accept() {
        let state = requested(SessionKind::Instant);
        assert_matches!(
            plan_accept(&state, &student(), None),
            Err(CoreError::Forbidden(_))
        );
        assert_matches!(
            plan_accept(&state, &stranger(), None),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn accepting_outside_pending_tutor_approval_is_invalid_state_for_anyone() {
        let state = requested(SessionKind::Instant);
        let t = plan_accept(&state, &tutor(), None).unwrap();
        let confirmed = advanced(state, &t);

        for caller in [tutor(), student(), stranger()] {
            assert_matches!(
                plan_accept(&confirmed, &caller, None),
                Err(CoreError::InvalidState(_))
            );
        }
    }

    // -- confirm ----------------------------------------------------------

    #[test]
    fn confirming_allocates_deterministic_room() {
        let state = requested(SessionKind::Scheduled);
        let proposed = advanced(
            state.clone(),
            &plan_accept(&state, &tutor(), Some("2025-03-01T10:00")).unwrap(),
        );

        let t = plan_confirm(&proposed, &student()).unwrap();
        assert_eq!(t.status, SessionStatus::Confirmed);
        assert_eq!(t.room_name.as_deref(), Some("SkillHive_Session_42"));
        assert_eq!(t.scheduled_time.as_deref(), Some("2025-03-01T10:00"));
        assert_eq!(t.notice.kind, NotificationKind::SessionConfirmed);
        assert_eq!(t.notice.recipient_id, TUTOR);
        assert_eq!(
            t.notice.message,
            "Ada has confirmed the session for 2025-03-01T10:00."
        );
        assert_eq!(
            t.settle,
            Settle::Kinds {
                recipient_id: STUDENT,
                kinds: PROPOSAL_KINDS
            }
        );
        assert!(advanced(proposed, &t).room_invariant_holds());
    }

    #[test]
    fn only_student_may_confirm() {
        let state = requested(SessionKind::Scheduled);
        let proposed = advanced(
            state.clone(),
            &plan_accept(&state, &tutor(), Some("noon")).unwrap(),
        );
        assert_matches!(
            plan_confirm(&proposed, &tutor()),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn confirming_before_proposal_is_invalid_state() {
        let state = requested(SessionKind::Scheduled);
        assert_matches!(
            plan_confirm(&state, &student()),
            Err(CoreError::InvalidState(_))
        );
    }

    // -- reject -----------------------------------------------------------

    #[test]
    fn either_party_may_reject_pending_session() {
        let state = requested(SessionKind::Instant);

        let by_tutor = plan_reject(&state, &tutor(), None).unwrap();
        assert_eq!(by_tutor.status, SessionStatus::Rejected);
        assert_eq!(by_tutor.notice.recipient_id, STUDENT);
        assert_eq!(by_tutor.room_name, None);
        assert_eq!(by_tutor.settle, Settle::AllForSession);
        assert!(advanced(state.clone(), &by_tutor).room_invariant_holds());

        let by_student = plan_reject(&state, &student(), None).unwrap();
        assert_eq!(by_student.notice.recipient_id, TUTOR);
    }

    #[test]
    fn rejecting_proposed_session_is_allowed() {
        let state = requested(SessionKind::Scheduled);
        let proposed = advanced(
            state.clone(),
            &plan_accept(&state, &tutor(), Some("noon")).unwrap(),
        );
        let t = plan_reject(&proposed, &student(), Some("Too late for me")).unwrap();
        assert_eq!(t.status, SessionStatus::Rejected);
        assert_eq!(t.rejection_reason.as_deref(), Some("Too late for me"));
        assert_eq!(
            t.notice.message,
            "Ada has rejected the session. Reason: \"Too late for me\""
        );
    }

    #[test]
    fn blank_reason_is_dropped() {
        let state = requested(SessionKind::Scheduled);
        let t = plan_reject(&state, &tutor(), Some("  ")).unwrap();
        assert_eq!(t.rejection_reason, None);
        assert_eq!(t.notice.message, "Grace has rejected the session.");
    }

    #[test]
    fn overlong_reason_is_validation_error() {
        let state = requested(SessionKind::Scheduled);
        let reason = "x".repeat(MAX_REASON_LEN + 1);
        assert_matches!(
            plan_reject(&state, &tutor(), Some(&reason)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn stranger_cannot_reject() {
        let state = requested(SessionKind::Scheduled);
        assert_matches!(
            plan_reject(&state, &stranger(), None),
            Err(CoreError::Forbidden(_))
        );
    }

    #[test]
    fn confirmed_session_can_be_called_off() {
        let state = requested(SessionKind::Instant);
        let confirmed = advanced(state.clone(), &plan_accept(&state, &tutor(), None).unwrap());
        assert!(confirmed.has_room());

        let t = plan_reject(&confirmed, &student(), Some("Something came up")).unwrap();
        assert_eq!(t.status, SessionStatus::Rejected);
        assert_eq!(t.room_name, None);
        assert!(advanced(confirmed, &t).room_invariant_holds());
    }

    #[test]
    fn terminal_sessions_cannot_be_rejected() {
        for status in [
            SessionStatus::Rejected,
            SessionStatus::Completed,
            SessionStatus::Cancelled,
        ] {
            let mut state = requested(SessionKind::Scheduled);
            state.status = status;
            assert_matches!(
                plan_reject(&state, &tutor(), None),
                Err(CoreError::InvalidState(_))
            );
        }
    }

    // -- join -------------------------------------------------------------

    #[test]
    fn stranger_is_forbidden_from_join_in_any_status() {
        for status in SessionStatus::ALL {
            let mut state = requested(SessionKind::Instant);
            state.status = status;
            assert_matches!(
                check_joinable(&state, STRANGER),
                Err(CoreError::Forbidden(_))
            );
        }
    }

    #[test]
    fn unconfirmed_session_is_not_joinable() {
        // An instant request already has a room but is not yet confirmed.
        let state = requested(SessionKind::Instant);
        assert_matches!(
            check_joinable(&state, STUDENT),
            Err(CoreError::InvalidState(_))
        );
    }

    #[test]
    fn confirmed_session_is_joinable_by_both_parties() {
        let state = requested(SessionKind::Instant);
        let confirmed = advanced(
            state.clone(),
            &plan_accept(&state, &tutor(), None).unwrap(),
        );
        assert!(check_joinable(&confirmed, STUDENT).is_ok());
        assert!(check_joinable(&confirmed, TUTOR).is_ok());
    }

    // -- status -----------------------------------------------------------

    #[test]
    fn statuses_parse_from_their_names() {
        for status in SessionStatus::ALL {
            assert_eq!(status.as_str().parse::<SessionStatus>(), Ok(status));
        }
        assert!("pending".parse::<SessionStatus>().is_err());
    }

    #[test]
    fn pending_and_confirmed_statuses_are_non_terminal() {
        assert!(!SessionStatus::PendingTutorApproval.is_terminal());
        assert!(!SessionStatus::PendingStudentApproval.is_terminal());
        assert!(!SessionStatus::Confirmed.is_terminal());
        assert!(!SessionStatus::Confirmed.is_pending());
        assert!(SessionStatus::Rejected.is_terminal());
        assert!(SessionStatus::Cancelled.is_terminal());
        assert_eq!(
            pending_status_names(),
            vec!["pending_tutor_approval", "pending_student_approval"]
        );
    }
}
