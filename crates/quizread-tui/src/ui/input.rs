//! Keyboard input handling for the TUI.
//!
//! This module translates keyboard events into application state changes.
//! Overlays (sign-in, quiz, annotation, path entry) capture input while
//! they are open.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{
    can_add_email_char, can_add_password_char, App, AppState, AuthFocus, Tab,
};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    if matches!(app.state, AppState::ConfirmingQuit) {
        return handle_quit_confirm(app, key);
    }
    if matches!(app.state, AppState::SigningIn) {
        return handle_sign_in_input(app, key).await;
    }

    // Overlays take precedence over tab navigation
    if app.quiz.is_some() {
        handle_quiz_input(app, key).await;
        return Ok(false);
    }
    if app.annotation.is_some() {
        handle_annotation_input(app, key).await;
        return Ok(false);
    }
    if app.path_input.is_some() {
        handle_path_input(app, key).await;
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') => app.state = AppState::ConfirmingQuit,
        KeyCode::Char('1') => app.current_tab = Tab::Library,
        KeyCode::Char('2') => app.current_tab = Tab::Reading,
        KeyCode::Char('3') => app.current_tab = Tab::Timer,
        KeyCode::Left => app.current_tab = app.current_tab.prev(),
        KeyCode::Right => app.current_tab = app.current_tab.next(),
        KeyCode::Char('u') => app.refresh_current_tab(),
        KeyCode::Char('x') => app.dismiss_notification(),
        KeyCode::Char('o') => app.sign_out(),
        _ => match app.current_tab {
            Tab::Library => handle_library_input(app, key).await,
            Tab::Reading => handle_reading_input(app, key).await,
            Tab::Timer => handle_timer_input(app, key).await,
        },
    }

    Ok(false)
}

fn handle_quit_confirm(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.state = AppState::Quitting;
            Ok(true)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            // Back to wherever the user came from
            if app.is_authenticated() {
                app.state = AppState::Normal;
            } else {
                app.start_sign_in();
            }
            Ok(false)
        }
        _ => Ok(false),
    }
}

async fn handle_sign_in_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    // Mode switch works from any field
    if key.code == KeyCode::Char('r') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.auth_mode = app.auth_mode.toggle();
        app.auth_error = None;
        return Ok(false);
    }

    match key.code {
        KeyCode::Esc => app.state = AppState::ConfirmingQuit,
        KeyCode::Tab | KeyCode::Down => {
            app.auth_focus = match app.auth_focus {
                AuthFocus::Email => AuthFocus::Password,
                AuthFocus::Password => AuthFocus::Button,
                AuthFocus::Button => AuthFocus::Email,
            };
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.auth_focus = match app.auth_focus {
                AuthFocus::Email => AuthFocus::Button,
                AuthFocus::Password => AuthFocus::Email,
                AuthFocus::Button => AuthFocus::Password,
            };
        }
        KeyCode::Enter => match app.auth_focus {
            AuthFocus::Email => app.auth_focus = AuthFocus::Password,
            AuthFocus::Password | AuthFocus::Button => app.submit_auth().await,
        },
        KeyCode::Backspace => match app.auth_focus {
            AuthFocus::Email => {
                app.auth_email.pop();
            }
            AuthFocus::Password => {
                app.auth_password.pop();
            }
            AuthFocus::Button => {}
        },
        KeyCode::Char(c) => match app.auth_focus {
            AuthFocus::Email => {
                if can_add_email_char(app.auth_email.len()) {
                    app.auth_email.push(c);
                }
            }
            AuthFocus::Password => {
                if can_add_password_char(app.auth_password.len()) {
                    app.auth_password.push(c);
                }
            }
            AuthFocus::Button => {}
        },
        _ => {}
    }

    Ok(false)
}

async fn handle_quiz_input(app: &mut App, key: KeyEvent) {
    let option_count = app
        .quiz
        .as_ref()
        .map(|active| active.quiz.options.len())
        .unwrap_or(0);

    match key.code {
        KeyCode::Esc => app.quiz = None,
        KeyCode::Up => {
            if let Some(ref mut active) = app.quiz {
                active.selection = active.selection.saturating_sub(1);
            }
        }
        KeyCode::Down => {
            if let Some(ref mut active) = app.quiz {
                if active.selection + 1 < option_count {
                    active.selection += 1;
                }
            }
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = (c as usize) - ('1' as usize);
            if let Some(ref mut active) = app.quiz {
                if index < option_count {
                    active.selection = index;
                }
            }
        }
        KeyCode::Enter => app.submit_quiz_answer().await,
        _ => {}
    }
}

async fn handle_annotation_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.annotation = None,
        KeyCode::Enter => app.save_annotation().await,
        KeyCode::Backspace => {
            if let Some(ref mut prompt) = app.annotation {
                prompt.input.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(ref mut prompt) = app.annotation {
                prompt.input.push(c);
            }
        }
        _ => {}
    }
}

async fn handle_path_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.path_input = None,
        KeyCode::Enter => {
            if let Some(path) = app.path_input.take() {
                let path = path.trim().to_string();
                if !path.is_empty() {
                    app.add_book_from_path(&path).await;
                }
            }
        }
        KeyCode::Backspace => {
            if let Some(ref mut path) = app.path_input {
                path.pop();
            }
        }
        KeyCode::Char(c) => {
            if let Some(ref mut path) = app.path_input {
                path.push(c);
            }
        }
        _ => {}
    }
}

async fn handle_library_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.book_selection = app.book_selection.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if app.book_selection + 1 < app.books.len() {
                app.book_selection += 1;
            }
        }
        KeyCode::Enter => app.open_selected_book().await,
        KeyCode::Char('a') => app.path_input = Some(String::new()),
        KeyCode::Char('d') => app.remove_selected_book().await,
        _ => {}
    }
}

async fn handle_reading_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('n') | KeyCode::PageDown => app.turn_page(1).await,
        KeyCode::Char('p') | KeyCode::PageUp => app.turn_page(-1).await,
        KeyCode::Char(' ') => app.toggle_reading_paused().await,
        _ => {}
    }
}

async fn handle_timer_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('s') => app.start_focus_timer().await,
        KeyCode::Char(' ') => app.toggle_timer_paused().await,
        KeyCode::Char('b') => {
            if app.timer.is_none() {
                app.timer_phase = app.timer_phase.other();
            }
        }
        _ => {}
    }
}
