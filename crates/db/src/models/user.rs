//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use skillhive_core::error::CoreError;
use skillhive_core::identity::{Party, UserType};
use skillhive_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub profile_pic: String,
    pub user_type: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Parse the stored `user_type` column.
    pub fn user_type(&self) -> Result<UserType, CoreError> {
        self.user_type
            .parse()
            .map_err(|e: String| CoreError::Internal(format!("user {}: {e}", self.id)))
    }

    /// The user as a named party in session messages.
    pub fn party(&self) -> Party {
        Party::new(self.id, self.name.clone())
    }
}

/// DTO for creating a new user.
#[derive(Debug, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub profile_pic: Option<String>,
    pub user_type: UserType,
}
