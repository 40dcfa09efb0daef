//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionStore`: who is signed in, the derived bearer token, and the
//!   register/login/logout lifecycle, persisted through durable storage
//! - `AuthError`: the closed set of failures surfaced to the UI
//!
//! Sessions survive restarts; a 401 from any endpoint ends them.

pub mod error;
pub mod session;

pub use error::AuthError;
pub use session::{SessionStore, UserRecord, AUTH_TOKEN_KEY, CURRENT_USER_KEY};
