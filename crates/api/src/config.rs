use chrono::TimeDelta;
use skillhive_core::types::Timestamp;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Grace period for background tasks after the server stops accepting
    /// connections, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Pending-session expiry sweeper settings.
    pub session_expiry: SessionExpiryConfig,
}

/// Settings for cancelling sessions stuck in a pending status.
#[derive(Debug, Clone)]
pub struct SessionExpiryConfig {
    /// Hours a session may stay pending before it is cancelled.
    /// `0` disables the sweeper.
    pub pending_expiry_hours: i64,
    /// Seconds between sweeps.
    pub interval_secs: u64,
}

impl SessionExpiryConfig {
    pub fn is_enabled(&self) -> bool {
        self.pending_expiry_hours > 0
    }

    /// Sessions pending since before the returned instant are stale.
    ///
    /// Returns `None` when `pending_expiry_hours` does not fit in a
    /// [`TimeDelta`] or the subtraction leaves the representable range.
    pub fn cutoff(&self, now: Timestamp) -> Option<Timestamp> {
        let window = TimeDelta::try_hours(self.pending_expiry_hours)?;
        now.checked_sub_signed(window)
    }

    /// | Env Var                        | Default |
    /// |--------------------------------|---------|
    /// | `SESSION_PENDING_EXPIRY_HOURS` | `0`     |
    /// | `SESSION_EXPIRY_INTERVAL_SECS` | `300`   |
    pub fn from_env() -> Self {
        let pending_expiry_hours: i64 = std::env::var("SESSION_PENDING_EXPIRY_HOURS")
            .unwrap_or_else(|_| "0".into())
            .parse()
            .expect("SESSION_PENDING_EXPIRY_HOURS must be a valid i64");

        let interval_secs: u64 = std::env::var("SESSION_EXPIRY_INTERVAL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("SESSION_EXPIRY_INTERVAL_SECS must be a valid u64");

        Self {
            pending_expiry_hours,
            interval_secs,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS`| `30`                       |
    ///
    /// See [`JwtConfig::from_env`] and [`SessionExpiryConfig::from_env`] for
    /// the nested settings.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt: JwtConfig::from_env(),
            session_expiry: SessionExpiryConfig::from_env(),
        }
    }
}
