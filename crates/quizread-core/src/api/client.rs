//! HTTP client for the QuizRead backend.
//!
//! This module provides the `ApiClient` struct wrapping every backend
//! endpoint. The wire contract is uniform: POST with a JSON body, JSON
//! back, bearer token in the `Authorization` header once a session exists.

use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use tracing::debug;

use crate::models::{
    Annotation, AnnotationRef, AnswerResult, AuthResponse, Book, BookExists, BookIds, BookRef,
    FocusTimer, PrepareUpload, Quiz, QuizAttempt, QuizContext, QuizRef, ReadingSession,
    SessionRef, TimerPhase, TimerRef, TriggerCheck, UserProfile,
};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 10s accommodates the backend's slower endpoints (quiz generation) while
/// failing fast enough for an interactive client.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// API client for the QuizRead backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client for the given base URL
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token (after logout or a rejected session)
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Create a new ApiClient with the given token, sharing the connection pool.
    pub fn with_token(&self, token: String) -> Self {
        Self {
            client: self.client.clone(), // Cheap clone, shares connection pool
            base_url: self.base_url.clone(),
            token: Some(token),
        }
    }

    /// Check if response is successful, returning a mapped error with the
    /// body text if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "POST");

        let mut request = self.client.post(&url).json(body);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = Self::check_response(request.send().await?).await?;
        response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("{}: {}", path, e)))
    }

    /// POST for endpoints whose response body carries nothing we keep.
    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let _: serde_json::Value = self.post(path, body).await?;
        Ok(())
    }

    // ===== Identity =====

    /// Register a new user. The password digest is computed by the caller;
    /// cleartext passwords never reach this layer.
    pub async fn register(&self, email: &str, password_hash: &str) -> Result<AuthResponse, ApiError> {
        self.post(
            "/api/UserAuth/register",
            &json!({ "email": email, "passwordHash": password_hash }),
        )
        .await
    }

    pub async fn login(&self, email: &str, password_hash: &str) -> Result<AuthResponse, ApiError> {
        self.post(
            "/api/UserAuth/login",
            &json!({ "email": email, "passwordHash": password_hash }),
        )
        .await
    }

    /// Fetch a user by id. The backend returns an array of rows.
    pub async fn get_user(&self, user_id: &str) -> Result<Vec<UserProfile>, ApiError> {
        self.post("/api/UserAuth/_getUser", &json!({ "userId": user_id }))
            .await
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Vec<UserProfile>, ApiError> {
        self.post("/api/UserAuth/_getUserByEmail", &json!({ "email": email }))
            .await
    }

    pub async fn list_users(&self) -> Result<Vec<UserProfile>, ApiError> {
        self.post("/api/UserAuth/_getAllUsers", &json!({})).await
    }

    // ===== Library =====

    /// Ask the backend for a signed upload target for a new book file.
    pub async fn prepare_upload(
        &self,
        owner_id: &str,
        file_name: &str,
    ) -> Result<PrepareUpload, ApiError> {
        self.post(
            "/api/Library/prepareUpload",
            &json!({ "ownerId": owner_id, "fileName": file_name }),
        )
        .await
    }

    /// PUT the raw PDF bytes to the signed upload URL from `prepare_upload`.
    pub async fn upload_pdf(&self, upload_url: &str, bytes: Vec<u8>) -> Result<(), ApiError> {
        debug!(url = %upload_url, len = bytes.len(), "Uploading PDF");
        let response = self
            .client
            .put(upload_url)
            .header(header::CONTENT_TYPE, "application/pdf")
            .body(bytes)
            .send()
            .await?;
        Self::check_response(response).await?;
        Ok(())
    }

    pub async fn add_book(
        &self,
        owner_id: &str,
        title: &str,
        total_pages: u32,
        storage_url: &str,
    ) -> Result<BookRef, ApiError> {
        self.post(
            "/api/Library/addBook",
            &json!({
                "ownerId": owner_id,
                "title": title,
                "totalPages": total_pages,
                "storageUrl": storage_url,
            }),
        )
        .await
    }

    pub async fn get_book(&self, book_id: &str) -> Result<BookExists, ApiError> {
        self.post("/api/Library/getBook", &json!({ "bookId": book_id }))
            .await
    }

    pub async fn list_books(&self, owner_id: &str) -> Result<BookIds, ApiError> {
        self.post("/api/Library/listBooks", &json!({ "ownerId": owner_id }))
            .await
    }

    pub async fn remove_book(&self, owner_id: &str, book_id: &str) -> Result<(), ApiError> {
        self.post_unit(
            "/api/Library/removeBook",
            &json!({ "ownerId": owner_id, "bookId": book_id }),
        )
        .await
    }

    pub async fn get_book_details(&self, book_id: &str) -> Result<Vec<Book>, ApiError> {
        self.post("/api/Library/_getBook", &json!({ "bookId": book_id }))
            .await
    }

    pub async fn list_user_books(&self, owner_id: &str) -> Result<Vec<Book>, ApiError> {
        self.post("/api/Library/_getUserBooks", &json!({ "ownerId": owner_id }))
            .await
    }

    pub async fn list_all_books(&self) -> Result<Vec<Book>, ApiError> {
        self.post("/api/Library/_getAllBooks", &json!({})).await
    }

    // ===== Reading progress =====

    pub async fn initialize_progress(
        &self,
        user_id: &str,
        book_id: &str,
        total_pages: u32,
        quiz_interval: u32,
        annotation_interval: u32,
    ) -> Result<SessionRef, ApiError> {
        self.post(
            "/api/ReadingProgress/initializeProgress",
            &json!({
                "userId": user_id,
                "bookId": book_id,
                "totalPages": total_pages,
                "quizInterval": quiz_interval,
                "annotationInterval": annotation_interval,
            }),
        )
        .await
    }

    pub async fn update_progress(&self, session_id: &str, new_page: u32) -> Result<(), ApiError> {
        self.post_unit(
            "/api/ReadingProgress/updateProgress",
            &json!({ "sessionId": session_id, "newPage": new_page }),
        )
        .await
    }

    /// Ask whether a quiz is due at the session's current page.
    pub async fn trigger_quiz(&self, session_id: &str) -> Result<TriggerCheck, ApiError> {
        self.post(
            "/api/ReadingProgress/triggerQuiz",
            &json!({ "sessionId": session_id }),
        )
        .await
    }

    /// Ask whether an annotation prompt is due at the session's current page.
    pub async fn trigger_annotation(&self, session_id: &str) -> Result<TriggerCheck, ApiError> {
        self.post(
            "/api/ReadingProgress/triggerAnnotation",
            &json!({ "sessionId": session_id }),
        )
        .await
    }

    pub async fn record_quiz_triggered(&self, session_id: &str) -> Result<(), ApiError> {
        self.post_unit(
            "/api/ReadingProgress/recordQuizTriggered",
            &json!({ "sessionId": session_id }),
        )
        .await
    }

    pub async fn record_annotation_triggered(&self, session_id: &str) -> Result<(), ApiError> {
        self.post_unit(
            "/api/ReadingProgress/recordAnnotationTriggered",
            &json!({ "sessionId": session_id }),
        )
        .await
    }

    pub async fn pause_reading(&self, session_id: &str) -> Result<(), ApiError> {
        self.post_unit(
            "/api/ReadingProgress/pauseReading",
            &json!({ "sessionId": session_id }),
        )
        .await
    }

    pub async fn resume_reading(&self, session_id: &str) -> Result<(), ApiError> {
        self.post_unit(
            "/api/ReadingProgress/resumeReading",
            &json!({ "sessionId": session_id }),
        )
        .await
    }

    pub async fn get_reading_session(
        &self,
        session_id: &str,
    ) -> Result<Vec<ReadingSession>, ApiError> {
        self.post(
            "/api/ReadingProgress/_getReadingSession",
            &json!({ "sessionId": session_id }),
        )
        .await
    }

    pub async fn list_user_sessions(&self, user_id: &str) -> Result<Vec<ReadingSession>, ApiError> {
        self.post(
            "/api/ReadingProgress/_getUserSessions",
            &json!({ "userId": user_id }),
        )
        .await
    }

    pub async fn list_book_sessions(&self, book_id: &str) -> Result<Vec<ReadingSession>, ApiError> {
        self.post(
            "/api/ReadingProgress/_getBookSessions",
            &json!({ "bookId": book_id }),
        )
        .await
    }

    pub async fn list_active_sessions(&self) -> Result<Vec<ReadingSession>, ApiError> {
        self.post("/api/ReadingProgress/_getActiveSessions", &json!({}))
            .await
    }

    // ===== Quiz =====

    pub async fn create_quiz(&self, content: &str) -> Result<QuizRef, ApiError> {
        self.post("/api/CheckpointQuiz/createQuiz", &json!({ "content": content }))
            .await
    }

    /// Create a quiz directly from the book's PDF around the current page.
    pub async fn create_quiz_from_pdf(
        &self,
        user_id: &str,
        book_id: &str,
        current_page: u32,
        page_range: u32,
    ) -> Result<QuizRef, ApiError> {
        self.post(
            "/api/CheckpointQuiz/createQuizFromPDF",
            &json!({
                "userId": user_id,
                "bookId": book_id,
                "currentPage": current_page,
                "pageRange": page_range,
            }),
        )
        .await
    }

    pub async fn get_quiz_context(
        &self,
        user_id: &str,
        book_id: &str,
        current_page: u32,
        page_range: u32,
    ) -> Result<QuizContext, ApiError> {
        self.post(
            "/api/CheckpointQuiz/getQuizContext",
            &json!({
                "userId": user_id,
                "bookId": book_id,
                "currentPage": current_page,
                "pageRange": page_range,
            }),
        )
        .await
    }

    pub async fn submit_quiz_answer(
        &self,
        user_id: &str,
        quiz_id: &str,
        selected_index: u32,
    ) -> Result<AnswerResult, ApiError> {
        self.post(
            "/api/CheckpointQuiz/submitQuizAnswer",
            &json!({
                "userId": user_id,
                "quizId": quiz_id,
                "selectedIndex": selected_index,
            }),
        )
        .await
    }

    pub async fn get_quiz(&self, quiz_id: &str) -> Result<Vec<Quiz>, ApiError> {
        self.post("/api/CheckpointQuiz/_getQuiz", &json!({ "quizId": quiz_id }))
            .await
    }

    pub async fn get_quiz_attempts(&self, quiz_id: &str) -> Result<Vec<QuizAttempt>, ApiError> {
        self.post(
            "/api/CheckpointQuiz/_getQuizAttempts",
            &json!({ "quizId": quiz_id }),
        )
        .await
    }

    pub async fn get_user_attempts(&self, user_id: &str) -> Result<Vec<QuizAttempt>, ApiError> {
        self.post(
            "/api/CheckpointQuiz/_getUserAttempts",
            &json!({ "userId": user_id }),
        )
        .await
    }

    // ===== Annotations =====

    pub async fn save_annotation(
        &self,
        user_id: &str,
        content: &str,
        key_ideas: &str,
    ) -> Result<AnnotationRef, ApiError> {
        self.post(
            "/api/Annotate/saveAnnotation",
            &json!({
                "userId": user_id,
                "content": content,
                "keyIdeas": key_ideas,
            }),
        )
        .await
    }

    pub async fn get_user_annotations(
        &self,
        user_id: &str,
        content: &str,
    ) -> Result<Vec<Annotation>, ApiError> {
        self.post(
            "/api/Annotate/_getUserAnnotations",
            &json!({ "userId": user_id, "content": content }),
        )
        .await
    }

    pub async fn get_all_user_annotations(&self, user_id: &str) -> Result<Vec<Annotation>, ApiError> {
        self.post(
            "/api/Annotate/_getAllUserAnnotations",
            &json!({ "userId": user_id }),
        )
        .await
    }

    pub async fn get_annotations_for_book(&self, book_id: &str) -> Result<Vec<Annotation>, ApiError> {
        self.post(
            "/api/Annotate/_getAnnotationsForBook",
            &json!({ "bookId": book_id }),
        )
        .await
    }

    // ===== Focus timer =====

    pub async fn start_timer(
        &self,
        duration_ms: u64,
        phase: TimerPhase,
    ) -> Result<TimerRef, ApiError> {
        self.post(
            "/api/FocusTimer/start",
            &json!({ "durationMs": duration_ms, "phase": phase.as_str() }),
        )
        .await
    }

    pub async fn pause_timer(&self, timer_id: &str) -> Result<(), ApiError> {
        self.post_unit("/api/FocusTimer/pause", &json!({ "timerId": timer_id }))
            .await
    }

    pub async fn resume_timer(&self, timer_id: &str) -> Result<(), ApiError> {
        self.post_unit("/api/FocusTimer/resume", &json!({ "timerId": timer_id }))
            .await
    }

    pub async fn expire_timer(&self, timer_id: &str) -> Result<(), ApiError> {
        self.post_unit("/api/FocusTimer/expire", &json!({ "timerId": timer_id }))
            .await
    }

    pub async fn get_timer(&self, timer_id: &str) -> Result<Vec<FocusTimer>, ApiError> {
        self.post("/api/FocusTimer/_getTimer", &json!({ "timerId": timer_id }))
            .await
    }

    pub async fn get_active_timers(&self) -> Result<Vec<FocusTimer>, ApiError> {
        self.post("/api/FocusTimer/_getActiveTimers", &json!({})).await
    }

    pub async fn get_timers_by_phase(&self, phase: TimerPhase) -> Result<Vec<FocusTimer>, ApiError> {
        self.post(
            "/api/FocusTimer/_getTimersByPhase",
            &json!({ "phase": phase.as_str() }),
        )
        .await
    }
}
