//! Row models and DTOs, one module per table.

pub mod notification;
pub mod tutoring_session;
pub mod user;
