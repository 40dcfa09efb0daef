//! REST client module for the QuizRead backend.
//!
//! This module provides the `ApiClient` for talking to the identity,
//! library, reading-progress, quiz, annotation, and focus-timer endpoint
//! families. Every call is JSON over POST; authenticated calls carry a
//! bearer token.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
