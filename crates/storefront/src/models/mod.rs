//! Session-facing data models.

pub mod session;

pub use session::keys as session_keys;
