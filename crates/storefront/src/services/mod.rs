//! External service clients.

pub mod newsletter;
