//! Identity attributes the negotiation rules depend on.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Learning preference recorded on a user profile.
///
/// Only `teach` and `both` users may be the tutor of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Study,
    Teach,
    Both,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::Study => "study",
            UserType::Teach => "teach",
            UserType::Both => "both",
        }
    }

    /// Whether a user of this type may be requested as a tutor.
    pub fn can_teach(self) -> bool {
        matches!(self, UserType::Teach | UserType::Both)
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "study" => Ok(UserType::Study),
            "teach" => Ok(UserType::Teach),
            "both" => Ok(UserType::Both),
            other => Err(format!("Unknown user type '{other}'")),
        }
    }
}

/// A resolved participant: the id plus the display name used in messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Party {
    pub id: DbId,
    pub name: String,
}

impl Party {
    pub fn new(id: DbId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
