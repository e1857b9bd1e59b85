//! Session lifecycle coordinator.
//!
//! Every operation runs as one transaction: the session row is locked, the
//! pure rules in [`skillhive_core::negotiation`] decide the transition, and
//! the session update, the counterpart's notification and the settled
//! notifications are committed together. If any write fails, nothing is
//! applied.

use skillhive_core::error::CoreError;
use skillhive_core::identity::Party;
use skillhive_core::negotiation::{
    check_joinable, plan_accept, plan_confirm, plan_reject, plan_request, validate_target,
    SessionKind, SessionState, SessionStatus, Transition,
};
use skillhive_core::types::DbId;
use skillhive_db::models::tutoring_session::{
    CreateTutoringSession, TutoringSession, UpdateNegotiation,
};
use skillhive_db::repositories::{TutoringSessionRepo, UserRepo};
use skillhive_db::DbPool;
use sqlx::{PgConnection, Postgres, Transaction};

use crate::error::AppResult;
use crate::negotiation::NotificationEmitter;

/// Drives tutoring sessions from request to a joinable video room.
///
/// Holds no session state of its own, only a pool handle, so it is cheap to
/// clone into handlers and background tasks.
#[derive(Clone)]
pub struct SessionCoordinator {
    pool: DbPool,
}

impl SessionCoordinator {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// The student asks `tutor_id` to start a session right now. The room is
    /// allocated immediately so that accepting leads straight to joining.
    pub async fn create_instant_session(
        &self,
        student_id: DbId,
        tutor_id: DbId,
    ) -> AppResult<TutoringSession> {
        self.create_request(student_id, tutor_id, SessionKind::Instant)
            .await
    }

    /// The student asks `tutor_id` for a session at a time the tutor will
    /// propose.
    pub async fn create_scheduled_session(
        &self,
        student_id: DbId,
        tutor_id: DbId,
    ) -> AppResult<TutoringSession> {
        self.create_request(student_id, tutor_id, SessionKind::Scheduled)
            .await
    }

    async fn create_request(
        &self,
        student_id: DbId,
        tutor_id: DbId,
        kind: SessionKind,
    ) -> AppResult<TutoringSession> {
        let mut tx = self.pool.begin().await?;

        let student = load_party(&mut tx, student_id).await?;
        let tutor_type = match UserRepo::find_by_id_in(&mut tx, tutor_id).await? {
            Some(tutor) => Some(tutor.user_type()?),
            None => None,
        };
        validate_target(student.id, tutor_id, tutor_type)?;

        if TutoringSessionRepo::find_open_between(&mut tx, student.id, tutor_id)
            .await?
            .is_some()
        {
            return Err(CoreError::Conflict(
                "You already have a pending request with this tutor".into(),
            )
            .into());
        }

        let plan = plan_request(&student, tutor_id, kind);
        let input = CreateTutoringSession {
            student_id: student.id,
            tutor_id,
            kind: plan.kind,
            status: plan.status,
            room_name: plan.room_name,
        };
        let session = TutoringSessionRepo::create(&mut tx, &input).await?;
        NotificationEmitter::emit(&mut tx, &plan.notice, session.id).await?;

        tx.commit().await?;

        tracing::info!(
            session_id = session.id,
            student_id,
            tutor_id,
            kind = %kind,
            "Session requested"
        );

        Ok(session)
    }

    /// The tutor accepts a pending request. Instant sessions become
    /// `confirmed`; scheduled sessions need `scheduled_time` and move to
    /// `pending_student_approval`.
    pub async fn accept_session(
        &self,
        tutor_id: DbId,
        session_id: DbId,
        scheduled_time: Option<&str>,
    ) -> AppResult<TutoringSession> {
        let mut tx = self.pool.begin().await?;

        let caller = load_party(&mut tx, tutor_id).await?;
        let state = lock_session(&mut tx, session_id).await?;
        let transition = plan_accept(&state, &caller, scheduled_time)?;
        let session = commit_transition(tx, session_id, &transition).await?;

        tracing::info!(
            session_id,
            user_id = tutor_id,
            status = %transition.status,
            "Session accepted"
        );

        Ok(session)
    }

    /// The student confirms the proposed time; the room is allocated.
    pub async fn confirm_session(
        &self,
        student_id: DbId,
        session_id: DbId,
    ) -> AppResult<TutoringSession> {
        let mut tx = self.pool.begin().await?;

        let caller = load_party(&mut tx, student_id).await?;
        let state = lock_session(&mut tx, session_id).await?;
        let transition = plan_confirm(&state, &caller)?;
        let session = commit_transition(tx, session_id, &transition).await?;

        tracing::info!(session_id, user_id = student_id, "Session confirmed");

        Ok(session)
    }

    /// Either participant rejects a pending session, or calls off a
    /// confirmed one.
    pub async fn reject_session(
        &self,
        caller_id: DbId,
        session_id: DbId,
        reason: Option<&str>,
    ) -> AppResult<TutoringSession> {
        let mut tx = self.pool.begin().await?;

        let caller = load_party(&mut tx, caller_id).await?;
        let state = lock_session(&mut tx, session_id).await?;
        let transition = plan_reject(&state, &caller, reason)?;
        let session = commit_transition(tx, session_id, &transition).await?;

        tracing::info!(
            session_id,
            user_id = caller_id,
            has_reason = transition.rejection_reason.is_some(),
            "Session rejected"
        );

        Ok(session)
    }

    /// Fetch a session for its meeting page. Only participants of a
    /// confirmed session with a room may see it.
    pub async fn get_session_for_join(
        &self,
        caller_id: DbId,
        session_id: DbId,
    ) -> AppResult<TutoringSession> {
        let session = TutoringSessionRepo::find_by_id(&self.pool, session_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "TutoringSession",
                id: session_id,
            })?;

        check_joinable(&session.negotiation_state()?, caller_id)?;

        Ok(session)
    }

    /// Sessions the user takes part in, as student or tutor, newest first.
    pub async fn list_sessions(
        &self,
        user_id: DbId,
        status: Option<SessionStatus>,
        limit: i64,
        offset: i64,
    ) -> AppResult<Vec<TutoringSession>> {
        let sessions =
            TutoringSessionRepo::list_for_user(&self.pool, user_id, status, limit, offset).await?;
        Ok(sessions)
    }
}

/// Resolve the caller's identity record into a named party.
async fn load_party(conn: &mut PgConnection, user_id: DbId) -> AppResult<Party> {
    let user = UserRepo::find_by_id_in(conn, user_id)
        .await?
        .ok_or_else(|| CoreError::Unauthorized(format!("Unknown user {user_id}")))?;
    Ok(user.party())
}

/// Lock the session row for the rest of the transaction and read its state.
async fn lock_session(conn: &mut PgConnection, session_id: DbId) -> AppResult<SessionState> {
    let session = TutoringSessionRepo::find_by_id_for_update(conn, session_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "TutoringSession",
            id: session_id,
        })?;
    Ok(session.negotiation_state()?)
}

/// Persist a planned transition, emit its notice and settle the resolved
/// notifications, then commit.
async fn commit_transition(
    mut tx: Transaction<'static, Postgres>,
    session_id: DbId,
    transition: &Transition,
) -> AppResult<TutoringSession> {
    let update = UpdateNegotiation {
        status: transition.status,
        scheduled_time: transition.scheduled_time.clone(),
        room_name: transition.room_name.clone(),
        rejection_reason: transition.rejection_reason.clone(),
    };
    let session = TutoringSessionRepo::update_negotiation(&mut tx, session_id, &update).await?;

    NotificationEmitter::emit(&mut tx, &transition.notice, session_id).await?;
    let settled = NotificationEmitter::settle(&mut tx, session_id, transition.settle).await?;

    tx.commit().await?;

    tracing::debug!(session_id, settled, "Transition committed");

    Ok(session)
}
