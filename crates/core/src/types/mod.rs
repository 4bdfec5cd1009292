//! Core types for Venture Couture.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;

pub use email::{Email, EmailError};
