//! Application state management for the QuizRead TUI.
//!
//! This module contains the core `App` struct holding UI state, the session
//! store, the notification queue, and background refresh coordination. It is
//! also where rejected sessions are handled: any 401 from the backend clears
//! the session and drops the user back on the sign-in screen.

use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{self, StreamExt};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use quizread_core::api::{ApiClient, ApiError};
use quizread_core::models::{Book, FocusTimer, Quiz, TimerPhase};
use quizread_core::{pdf, Config, NotificationQueue, SessionStore, Storage};

// ============================================================================
// Constants
// ============================================================================

/// Buffer size for the background task message channel.
/// A handful of refresh operations at most are ever in flight.
const CHANNEL_BUFFER_SIZE: usize = 32;

/// Maximum length for email input
const MAX_EMAIL_LENGTH: usize = 64;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum concurrent API requests when fetching book details.
/// Keeps a large library refresh from overwhelming the backend.
const MAX_CONCURRENT_REQUESTS: usize = 4;

/// Pages between comprehension quizzes for new reading sessions
const DEFAULT_QUIZ_INTERVAL: u32 = 10;

/// Pages between annotation prompts for new reading sessions
const DEFAULT_ANNOTATION_INTERVAL: u32 = 15;

/// Pages of context the backend reads around the current page for a quiz
const QUIZ_PAGE_RANGE: u32 = 2;

/// Focus timer block lengths in minutes
const READING_MINUTES: u64 = 25;
const BREAK_MINUTES: u64 = 5;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Library,
    Reading,
    Timer,
}

impl Tab {
    /// Get the display title for this tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Library => "Library",
            Tab::Reading => "Reading",
            Tab::Timer => "Timer",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Library => Tab::Reading,
            Tab::Reading => Tab::Timer,
            Tab::Timer => Tab::Library,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Tab::Library => Tab::Timer,
            Tab::Reading => Tab::Library,
            Tab::Timer => Tab::Reading,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    SigningIn,
    ConfirmingQuit,
    Quitting,
}

/// Which account operation the sign-in overlay submits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign in",
            AuthMode::Register => "Create account",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFocus {
    Email,
    Password,
    Button,
}

/// A quiz currently on screen
pub struct ActiveQuiz {
    pub quiz: Quiz,
    pub selection: usize,
    /// Some(correct) once the answer came back
    pub answered: Option<bool>,
}

/// An annotation prompt currently on screen
pub struct AnnotationPrompt {
    /// What is being annotated (book and page marker)
    pub context: String,
    /// Key ideas typed by the user
    pub input: String,
}

/// The book open in the Reading tab
pub struct ReadingState {
    pub session_id: String,
    pub book: Book,
    pub current_page: u32,
    pub paused: bool,
}

/// Result types from background refresh tasks.
///
/// These variants are sent through an MPSC channel from spawned refresh
/// tasks back to the UI loop.
pub enum RefreshResult {
    Books(Result<Vec<Book>, ApiError>),
    Timers(Result<Vec<FocusTimer>, ApiError>),
}

// ============================================================================
// App
// ============================================================================

pub struct App {
    pub config: Config,
    pub session: SessionStore,
    pub notifications: NotificationQueue,
    api: ApiClient,

    pub state: AppState,
    pub current_tab: Tab,

    // Sign-in form
    pub auth_mode: AuthMode,
    pub auth_email: String,
    pub auth_password: String,
    pub auth_focus: AuthFocus,
    pub auth_error: Option<String>,

    // Library
    pub books: Vec<Book>,
    pub book_selection: usize,
    /// Some while the user is typing a PDF path to upload
    pub path_input: Option<String>,

    // Reading
    pub reading: Option<ReadingState>,
    pub quiz: Option<ActiveQuiz>,
    pub annotation: Option<AnnotationPrompt>,

    // Focus timer
    pub timer: Option<FocusTimer>,
    pub timer_phase: TimerPhase,
    timer_deadline: Option<Instant>,
    pub active_timers: Vec<FocusTimer>,

    // Background task channel
    refresh_rx: mpsc::Receiver<RefreshResult>,
    refresh_tx: mpsc::Sender<RefreshResult>,

    // Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create a new application instance
    pub fn new() -> Result<Self> {
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let data_dir = config
            .data_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("./quizread-data"));
        debug!(?data_dir, "Data directory configured");

        let mut api = ApiClient::new(&config.api_url())?;
        let session = SessionStore::new(api.clone(), Storage::open(data_dir)?);

        // A restored session carries its token straight onto the API client
        if let Some(token) = session.auth_token() {
            api.set_token(token.to_string());
            debug!("Token set on API client");
        }

        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);

        let auth_email = config.last_email.clone().unwrap_or_default();

        Ok(Self {
            config,
            session,
            notifications: NotificationQueue::new(),
            api,

            state: AppState::Normal,
            current_tab: Tab::Library,

            auth_mode: AuthMode::Login,
            auth_email,
            auth_password: String::new(),
            auth_focus: AuthFocus::Email,
            auth_error: None,

            books: Vec::new(),
            book_selection: 0,
            path_input: None,

            reading: None,
            quiz: None,
            annotation: None,

            timer: None,
            timer_phase: TimerPhase::Reading,
            timer_deadline: None,
            active_timers: Vec::new(),

            refresh_rx: rx,
            refresh_tx: tx,

            status_message: None,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Show the sign-in overlay (the only reachable surface while signed out)
    pub fn start_sign_in(&mut self) {
        self.state = AppState::SigningIn;
        self.auth_focus = if self.auth_email.is_empty() {
            AuthFocus::Email
        } else {
            AuthFocus::Password
        };
        self.auth_error = None;
    }

    /// Submit the sign-in form in its current mode
    pub async fn submit_auth(&mut self) {
        let email = self.auth_email.trim().to_string();
        let password = self.auth_password.clone();

        if email.is_empty() || password.is_empty() {
            self.auth_error = Some("Email and password required".to_string());
            return;
        }
        self.auth_error = None;

        let result = match self.auth_mode {
            AuthMode::Login => self.session.login(&email, &password).await,
            AuthMode::Register => self.session.register(&email, &password).await,
        };

        match result {
            Ok(()) => {
                if let Some(token) = self.session.auth_token() {
                    self.api.set_token(token.to_string());
                }
                self.config.last_email = Some(email);
                if let Err(e) = self.config.save() {
                    warn!(error = %e, "Failed to save config");
                }
                self.auth_password.clear();
                self.state = AppState::Normal;
                info!(user_id = %self.session.user_id(), "Signed in");
                self.notifications.success(
                    "Welcome",
                    &format!("Signed in as {}", self.session.user_email()),
                );
                self.refresh_library_background();
            }
            Err(e) => {
                error!(error = %e, "Authentication failed");
                self.auth_error = Some(e.to_string());
            }
        }
    }

    /// Close the session and return to the sign-in overlay
    pub fn sign_out(&mut self) {
        self.session.logout();
        self.api.clear_token();

        self.books.clear();
        self.book_selection = 0;
        self.reading = None;
        self.quiz = None;
        self.annotation = None;
        self.timer = None;
        self.timer_deadline = None;
        self.active_timers.clear();
        self.current_tab = Tab::Library;

        self.start_sign_in();
    }

    /// Route an API failure. A 401 is fatal to the session: forced sign-out
    /// and back to the sign-in overlay, never retried. Anything else becomes
    /// an error notification.
    pub fn handle_api_error(&mut self, context: &str, err: ApiError) {
        if matches!(err, ApiError::Unauthorized) {
            warn!(context, "Session rejected by backend, signing out");
            self.sign_out();
            self.notifications
                .error("Session expired", "Please sign in again.");
        } else {
            error!(context, error = %err, "Request failed");
            self.notifications.error(context, &err.to_string());
        }
    }

    // =========================================================================
    // Library
    // =========================================================================

    /// Spawn a background task to refresh the book list
    pub fn refresh_library_background(&mut self) {
        let user_id = self.session.user_id();
        if user_id.is_empty() {
            return;
        }

        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        self.status_message = Some("Refreshing library...".to_string());

        tokio::spawn(async move {
            let result = Self::fetch_library(&api, &user_id).await;
            if tx.send(RefreshResult::Books(result)).await.is_err() {
                debug!("App dropped before library refresh completed");
            }
        });
    }

    /// Fetch the owned book ids, then their detail rows with bounded
    /// concurrency.
    async fn fetch_library(api: &ApiClient, user_id: &str) -> Result<Vec<Book>, ApiError> {
        let ids = api.list_books(user_id).await?.book_ids;
        debug!(count = ids.len(), "Fetching book details");

        let detail_results: Vec<Result<Vec<Book>, ApiError>> = stream::iter(ids)
            .map(|id| {
                let api = api.clone();
                async move { api.get_book_details(&id).await }
            })
            .buffer_unordered(MAX_CONCURRENT_REQUESTS)
            .collect()
            .await;

        let mut books = Vec::new();
        for result in detail_results {
            books.extend(result?);
        }
        books.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
        Ok(books)
    }

    /// Check for completed background tasks and fold in their results
    pub fn check_background_tasks(&mut self) {
        while let Ok(result) = self.refresh_rx.try_recv() {
            match result {
                RefreshResult::Books(Ok(books)) => {
                    self.books = books;
                    if self.book_selection >= self.books.len() {
                        self.book_selection = self.books.len().saturating_sub(1);
                    }
                    self.status_message = None;
                }
                RefreshResult::Books(Err(e)) => {
                    self.status_message = None;
                    self.handle_api_error("Library refresh failed", e);
                }
                RefreshResult::Timers(Ok(timers)) => {
                    self.active_timers = timers;
                    self.status_message = None;
                }
                RefreshResult::Timers(Err(e)) => {
                    self.status_message = None;
                    self.handle_api_error("Timer refresh failed", e);
                }
            }
        }
    }

    /// Upload the PDF at `path_str` and add it to the library
    pub async fn add_book_from_path(&mut self, path_str: &str) {
        let path = std::path::Path::new(path_str);
        if !pdf::is_pdf(path) {
            self.notifications
                .error("Upload failed", "Only PDF files can be added.");
            return;
        }

        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                self.notifications
                    .error("Upload failed", &format!("Could not read {}: {}", path_str, e));
                return;
            }
        };

        let pages = match pdf::page_count(&bytes) {
            Ok(pages) => pages,
            Err(e) => {
                self.notifications.error("Upload failed", &e.to_string());
                return;
            }
        };

        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Untitled".to_string());
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| format!("{}.pdf", title));
        let user_id = self.session.user_id();

        info!(%title, pages, "Uploading book");
        self.status_message = Some(format!("Uploading {}...", title));
        let result = self.upload_book(&user_id, &title, pages, bytes, &file_name).await;
        self.status_message = None;

        match result {
            Ok(()) => {
                self.notifications
                    .success("Book added", &format!("\"{}\" ({} pages)", title, pages));
                self.refresh_library_background();
            }
            Err(e) => self.handle_api_error("Upload failed", e),
        }
    }

    async fn upload_book(
        &self,
        user_id: &str,
        title: &str,
        pages: u32,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<(), ApiError> {
        let target = self.api.prepare_upload(user_id, file_name).await?;
        self.api.upload_pdf(&target.upload_url, bytes).await?;
        self.api
            .add_book(user_id, title, pages, &target.storage_url)
            .await?;
        Ok(())
    }

    pub async fn remove_selected_book(&mut self) {
        let Some(book) = self.books.get(self.book_selection) else {
            return;
        };
        let book_id = book.book_id.clone();
        let title = book.title.clone();
        let user_id = self.session.user_id();

        match self.api.remove_book(&user_id, &book_id).await {
            Ok(()) => {
                self.notifications
                    .info("Removed", &format!("\"{}\" removed from your library", title));
                self.refresh_library_background();
            }
            Err(e) => self.handle_api_error("Remove failed", e),
        }
    }

    /// Start a reading session for the selected book and switch tabs
    pub async fn open_selected_book(&mut self) {
        let Some(book) = self.books.get(self.book_selection).cloned() else {
            return;
        };
        let user_id = self.session.user_id();

        match self
            .api
            .initialize_progress(
                &user_id,
                &book.book_id,
                book.total_pages,
                DEFAULT_QUIZ_INTERVAL,
                DEFAULT_ANNOTATION_INTERVAL,
            )
            .await
        {
            Ok(session_ref) => {
                info!(book = %book.title, session = %session_ref.session_id, "Reading session started");
                self.reading = Some(ReadingState {
                    session_id: session_ref.session_id,
                    book,
                    current_page: 1,
                    paused: false,
                });
                self.current_tab = Tab::Reading;
            }
            Err(e) => self.handle_api_error("Could not open book", e),
        }
    }

    // =========================================================================
    // Reading
    // =========================================================================

    /// Move through the book. Progress goes to the backend first; prompts
    /// (quiz, then annotation) are checked after the page sticks.
    pub async fn turn_page(&mut self, delta: i32) {
        // Finish the open prompt before moving on
        if self.quiz.is_some() || self.annotation.is_some() {
            return;
        }
        let Some(ref reading) = self.reading else {
            return;
        };
        if reading.paused {
            return;
        }

        let total = reading.book.total_pages.max(1);
        let new_page = (i64::from(reading.current_page) + i64::from(delta)).clamp(1, i64::from(total)) as u32;
        if new_page == reading.current_page {
            return;
        }
        let session_id = reading.session_id.clone();

        if let Err(e) = self.api.update_progress(&session_id, new_page).await {
            self.handle_api_error("Progress update failed", e);
            return;
        }
        if let Some(ref mut reading) = self.reading {
            reading.current_page = new_page;
        }

        self.check_prompts(&session_id).await;
    }

    /// Quiz first; the annotation check only runs when no quiz fired, so at
    /// most one prompt opens per page turn.
    async fn check_prompts(&mut self, session_id: &str) {
        match self.api.trigger_quiz(session_id).await {
            Ok(check) if check.should_trigger => {
                self.start_quiz().await;
                return;
            }
            Ok(_) => {}
            Err(e) => {
                self.handle_api_error("Quiz check failed", e);
                return;
            }
        }

        match self.api.trigger_annotation(session_id).await {
            Ok(check) if check.should_trigger => self.start_annotation().await,
            Ok(_) => {}
            Err(e) => self.handle_api_error("Annotation check failed", e),
        }
    }

    async fn start_quiz(&mut self) {
        let Some(ref reading) = self.reading else {
            return;
        };
        let user_id = self.session.user_id();
        let book_id = reading.book.book_id.clone();
        let page = reading.current_page;
        let session_id = reading.session_id.clone();

        let fetched = async {
            let quiz_ref = self
                .api
                .create_quiz_from_pdf(&user_id, &book_id, page, QUIZ_PAGE_RANGE)
                .await?;
            let rows = self.api.get_quiz(&quiz_ref.quiz_id).await?;
            Ok::<_, ApiError>(rows.into_iter().next())
        }
        .await;

        match fetched {
            Ok(Some(quiz)) => {
                if let Err(e) = self.api.record_quiz_triggered(&session_id).await {
                    warn!(error = %e, "Failed to record quiz trigger");
                }
                info!(quiz_id = %quiz.quiz_id, page, "Quiz ready");
                self.quiz = Some(ActiveQuiz {
                    quiz,
                    selection: 0,
                    answered: None,
                });
            }
            Ok(None) => {
                self.notifications
                    .info("Quiz", "No quiz could be generated for this page.");
            }
            Err(e) => self.handle_api_error("Quiz failed", e),
        }
    }

    /// Submit the highlighted option, or dismiss the quiz if it was already
    /// answered.
    pub async fn submit_quiz_answer(&mut self) {
        let Some(ref active) = self.quiz else {
            return;
        };
        if active.answered.is_some() {
            self.quiz = None;
            return;
        }
        let user_id = self.session.user_id();
        let quiz_id = active.quiz.quiz_id.clone();
        let selection = active.selection as u32;

        match self.api.submit_quiz_answer(&user_id, &quiz_id, selection).await {
            Ok(result) => {
                if result.is_correct {
                    self.notifications.success("Correct!", "Nice recall - keep reading.");
                } else {
                    self.notifications
                        .error("Not quite", "Worth re-reading the last few pages.");
                }
                if let Some(ref mut active) = self.quiz {
                    active.answered = Some(result.is_correct);
                }
            }
            Err(e) => {
                self.quiz = None;
                self.handle_api_error("Answer failed", e);
            }
        }
    }

    async fn start_annotation(&mut self) {
        let Some(ref reading) = self.reading else {
            return;
        };
        let context = format!("{} - page {}", reading.book.title, reading.current_page);
        let session_id = reading.session_id.clone();

        if let Err(e) = self.api.record_annotation_triggered(&session_id).await {
            warn!(error = %e, "Failed to record annotation trigger");
        }
        self.annotation = Some(AnnotationPrompt {
            context,
            input: String::new(),
        });
    }

    /// Save the typed key ideas; an empty prompt is simply dismissed
    pub async fn save_annotation(&mut self) {
        let Some(prompt) = self.annotation.take() else {
            return;
        };
        if prompt.input.trim().is_empty() {
            return;
        }
        let user_id = self.session.user_id();

        match self
            .api
            .save_annotation(&user_id, &prompt.context, prompt.input.trim())
            .await
        {
            Ok(_) => {
                self.notifications.success("Annotation saved", &prompt.context);
            }
            Err(e) => self.handle_api_error("Annotation failed", e),
        }
    }

    pub async fn toggle_reading_paused(&mut self) {
        let Some(ref reading) = self.reading else {
            return;
        };
        let session_id = reading.session_id.clone();
        let paused = reading.paused;

        let result = if paused {
            self.api.resume_reading(&session_id).await
        } else {
            self.api.pause_reading(&session_id).await
        };

        match result {
            Ok(()) => {
                if let Some(ref mut reading) = self.reading {
                    reading.paused = !paused;
                }
            }
            Err(e) => self.handle_api_error("Session update failed", e),
        }
    }

    // =========================================================================
    // Focus timer
    // =========================================================================

    pub async fn start_focus_timer(&mut self) {
        if self.timer.is_some() {
            return;
        }
        let phase = self.timer_phase;
        let minutes = match phase {
            TimerPhase::Reading => READING_MINUTES,
            TimerPhase::Break => BREAK_MINUTES,
        };
        let duration_ms = minutes * 60 * 1000;

        match self.api.start_timer(duration_ms, phase).await {
            Ok(timer_ref) => {
                info!(timer_id = %timer_ref.timer_id, ?phase, "Focus timer started");
                self.timer = Some(FocusTimer {
                    timer_id: timer_ref.timer_id,
                    duration_ms,
                    phase: Some(phase),
                    status: Some("active".to_string()),
                    started_at: None,
                    remaining_ms: Some(duration_ms),
                });
                self.timer_deadline = Some(Instant::now() + Duration::from_millis(duration_ms));
                self.notifications.info(
                    "Focus timer",
                    &format!("{} minutes of {} started", minutes, phase.as_str()),
                );
            }
            Err(e) => self.handle_api_error("Timer failed", e),
        }
    }

    pub async fn toggle_timer_paused(&mut self) {
        let Some(ref timer) = self.timer else {
            return;
        };
        let timer_id = timer.timer_id.clone();

        if timer.is_paused() {
            match self.api.resume_timer(&timer_id).await {
                Ok(()) => {
                    if let Some(ref mut timer) = self.timer {
                        timer.status = Some("active".to_string());
                        let remaining = timer.remaining_ms.unwrap_or(0);
                        self.timer_deadline =
                            Some(Instant::now() + Duration::from_millis(remaining));
                    }
                }
                Err(e) => self.handle_api_error("Timer resume failed", e),
            }
        } else {
            match self.api.pause_timer(&timer_id).await {
                Ok(()) => {
                    let remaining = self.timer_remaining().unwrap_or_default();
                    if let Some(ref mut timer) = self.timer {
                        timer.status = Some("paused".to_string());
                        timer.remaining_ms = Some(remaining.as_millis() as u64);
                    }
                    self.timer_deadline = None;
                }
                Err(e) => self.handle_api_error("Timer pause failed", e),
            }
        }
    }

    /// Called from the event loop. When the locally observed countdown ends,
    /// report expiry and line up the other phase.
    pub async fn tick_timer(&mut self) {
        let Some(deadline) = self.timer_deadline else {
            return;
        };
        if Instant::now() < deadline {
            return;
        }
        self.timer_deadline = None;
        let Some(timer) = self.timer.take() else {
            return;
        };

        if let Err(e) = self.api.expire_timer(&timer.timer_id).await {
            self.handle_api_error("Timer expiry failed", e);
        }

        let phase = timer.phase.unwrap_or(TimerPhase::Reading);
        match phase {
            TimerPhase::Reading => {
                self.notifications
                    .success("Time for a break", "Reading block finished.");
            }
            TimerPhase::Break => {
                self.notifications
                    .info("Back to it", "Break finished - next reading block is queued.");
            }
        }
        self.timer_phase = phase.other();
    }

    /// Remaining time on the running or paused timer, for display
    pub fn timer_remaining(&self) -> Option<Duration> {
        match (&self.timer, self.timer_deadline) {
            (Some(timer), Some(deadline)) if timer.is_active() => {
                Some(deadline.saturating_duration_since(Instant::now()))
            }
            (Some(timer), _) if timer.is_paused() => {
                timer.remaining_ms.map(Duration::from_millis)
            }
            _ => None,
        }
    }

    pub fn refresh_timers_background(&mut self) {
        let api = self.api.clone();
        let tx = self.refresh_tx.clone();
        self.status_message = Some("Refreshing timers...".to_string());

        tokio::spawn(async move {
            let result = api.get_active_timers().await;
            if tx.send(RefreshResult::Timers(result)).await.is_err() {
                debug!("App dropped before timer refresh completed");
            }
        });
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Dismiss the oldest notification on screen
    pub fn dismiss_notification(&mut self) {
        if let Some(first) = self.notifications.items().first() {
            self.notifications.remove(first.id);
        }
    }

    pub fn refresh_current_tab(&mut self) {
        match self.current_tab {
            Tab::Library => self.refresh_library_background(),
            Tab::Timer => self.refresh_timers_background(),
            Tab::Reading => {}
        }
    }
}

/// Input length guards for the sign-in form
pub fn can_add_email_char(current_len: usize) -> bool {
    current_len < MAX_EMAIL_LENGTH
}

pub fn can_add_password_char(current_len: usize) -> bool {
    current_len < MAX_PASSWORD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle_is_closed() {
        let mut tab = Tab::Library;
        for _ in 0..3 {
            tab = tab.next();
        }
        assert_eq!(tab, Tab::Library);
        assert_eq!(Tab::Library.prev(), Tab::Timer);
        assert_eq!(Tab::Timer.next(), Tab::Library);
    }

    #[test]
    fn test_auth_mode_toggle() {
        assert_eq!(AuthMode::Login.toggle(), AuthMode::Register);
        assert_eq!(AuthMode::Register.toggle(), AuthMode::Login);
        assert_eq!(AuthMode::Register.title(), "Create account");
    }

    #[test]
    fn test_input_length_guards() {
        assert!(can_add_email_char(0));
        assert!(!can_add_email_char(MAX_EMAIL_LENGTH));
        assert!(can_add_password_char(MAX_PASSWORD_LENGTH - 1));
        assert!(!can_add_password_char(MAX_PASSWORD_LENGTH));
    }
}
