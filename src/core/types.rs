//! Core type aliases and re-exports

pub use glam::DVec3;

/// An instant in time. All solar math reads its UTC clock fields.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Standard Result type for the crate
pub type Result<T> = std::result::Result<T, crate::core::error::Error>;
