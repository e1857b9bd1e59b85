use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The operation is not legal in the entity's current status.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A field required by the requested transition was not supplied.
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// The target of a request cannot take part in it (the caller themself).
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
