//! Periodic cancellation of sessions left pending too long.
//!
//! A request the tutor never answers, or a proposal the student never
//! confirms, is moved to `cancelled` once it has been idle for longer than
//! the configured window. Its notifications are marked read so the inbox
//! stops prompting for it. No new notice is sent; notices always carry the
//! acting user as sender, and an expiry has none.

use std::time::Duration;

use chrono::Utc;
use skillhive_db::repositories::TutoringSessionRepo;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use crate::config::SessionExpiryConfig;

/// Run the expiry loop until `cancel` is triggered.
pub async fn run(pool: PgPool, config: SessionExpiryConfig, cancel: CancellationToken) {
    tracing::info!(
        pending_expiry_hours = config.pending_expiry_hours,
        interval_secs = config.interval_secs,
        "Session expiry job started"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(config.interval_secs.max(1)));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Session expiry job stopping");
                break;
            }
            _ = interval.tick() => {
                let Some(cutoff) = config.cutoff(Utc::now()) else {
                    tracing::error!(
                        pending_expiry_hours = config.pending_expiry_hours,
                        "Session expiry: window out of range, skipping sweep"
                    );
                    continue;
                };
                match TutoringSessionRepo::cancel_stale_pending(&pool, cutoff).await {
                    Ok(ids) if !ids.is_empty() => {
                        tracing::info!(
                            cancelled = ids.len(),
                            session_ids = ?ids,
                            "Session expiry: cancelled stale sessions"
                        );
                    }
                    Ok(_) => {
                        tracing::debug!("Session expiry: nothing to cancel");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Session expiry: sweep failed");
                    }
                }
            }
        }
    }
}
