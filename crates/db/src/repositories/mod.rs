//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Methods
//! that take `&PgPool` run on their own connection. Methods that take
//! `&mut PgConnection` are meant to run inside a caller's transaction.

pub mod notification_repo;
pub mod tutoring_session_repo;
pub mod user_repo;

pub use notification_repo::NotificationRepo;
pub use tutoring_session_repo::TutoringSessionRepo;
pub use user_repo::UserRepo;
