//! Data models for QuizRead entities.
//!
//! This module contains the wire types exchanged with the QuizRead backend:
//!
//! - `UserProfile`: identity rows returned by the user endpoints
//! - `Book` and upload types: the user's library
//! - `ReadingSession`, `TriggerCheck`: reading progress tracking
//! - `Quiz`, `QuizAttempt`, `AnswerResult`: comprehension quizzes
//! - `Annotation`: saved annotation prompts
//! - `FocusTimer`, `TimerPhase`: the focus timer

pub mod annotation;
pub mod book;
pub mod progress;
pub mod quiz;
pub mod timer;
pub mod user;

pub use annotation::{Annotation, AnnotationRef};
pub use book::{Book, BookExists, BookIds, BookRef, PrepareUpload};
pub use progress::{ReadingSession, SessionRef, TriggerCheck};
pub use quiz::{AnswerResult, Quiz, QuizAttempt, QuizContext, QuizRef};
pub use timer::{FocusTimer, TimerPhase, TimerRef};
pub use user::{AuthResponse, UserProfile};
