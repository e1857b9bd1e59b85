//! Session negotiation: the coordinator that drives session transitions and
//! the emitter that keeps the notification side-channel in step with them.
//!
//! The transition rules themselves live in
//! [`skillhive_core::negotiation`]; this module loads state, applies a
//! planned transition and its notifications in one transaction, and logs.

pub mod coordinator;
pub mod emitter;

pub use coordinator::SessionCoordinator;
pub use emitter::NotificationEmitter;
