//! Core library for the QuizRead terminal client.
//!
//! Everything the UI needs to talk to the QuizRead backend lives here:
//!
//! - `api`: the REST client and its error taxonomy
//! - `auth`: the session store (register/login/logout, persisted token)
//! - `notify`: the self-expiring notification queue
//! - `storage`: durable key-value persistence behind the session
//! - `models`: wire types for books, progress, quizzes, annotations, timers
//! - `config`: config file and base-URL resolution
//! - `pdf`: page counting for uploads

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod notify;
pub mod pdf;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthError, SessionStore, UserRecord};
pub use config::Config;
pub use notify::{Notification, NotificationKind, NotificationQueue};
pub use storage::Storage;
