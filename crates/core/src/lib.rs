//! Domain types and pure rules shared by the SkillHive DB and API layers.
//!
//! Nothing in this crate performs I/O. The session negotiation rules in
//! [`negotiation`] take the current session state and a caller, and answer
//! with either a planned transition or a [`error::CoreError`].

pub mod error;
pub mod identity;
pub mod negotiation;
pub mod notification_kind;
pub mod types;
