//! Data models
//!
//! Shared between mission-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `String` (UUID, or the user id a conciergerie claimed).
//! Timestamps are epoch milliseconds (`i64`).

pub mod conciergerie;
pub mod employee;
pub mod home;
pub mod mission;
pub mod notification;
pub mod objective;

// Re-exports
pub use conciergerie::*;
pub use employee::*;
pub use home::*;
pub use mission::*;
pub use notification::*;
pub use objective::*;
