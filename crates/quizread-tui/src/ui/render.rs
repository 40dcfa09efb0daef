use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use quizread_core::NotificationKind;

use crate::app::{App, AppState, AuthFocus, Tab};
use crate::utils::{format_countdown, format_date, truncate};

use super::styles;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Length(2), // Tabs
            Constraint::Min(10),   // Main content
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    render_main_content(frame, app, chunks[2]);
    render_status_bar(frame, app, chunks[3]);

    // Render overlays
    if matches!(app.state, AppState::SigningIn) {
        render_sign_in_overlay(frame, app);
    }
    if app.quiz.is_some() {
        render_quiz_overlay(frame, app);
    }
    if app.annotation.is_some() {
        render_annotation_overlay(frame, app);
    }
    if app.path_input.is_some() {
        render_path_input_overlay(frame, app);
    }
    if matches!(app.state, AppState::ConfirmingQuit) {
        render_quit_overlay(frame);
    }

    render_notifications(frame, app);
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = "  QuizRead";
    let user = if app.session.is_authenticated() {
        format!("{} ", app.session.user_email())
    } else {
        "signed out ".to_string()
    };

    let title_line = Line::from(vec![
        Span::styled(title, styles::title_style()),
        Span::raw(" ".repeat(
            (area.width as usize).saturating_sub(title.len() + user.len() + 1),
        )),
        Span::styled(user, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(title_line).block(block), area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let tabs = [Tab::Library, Tab::Reading, Tab::Timer];

    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in tabs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", styles::muted_style()));
        }
        let label = format!("[{}] {}", i + 1, tab.title());
        if *tab == app.current_tab {
            spans.push(Span::styled(label, styles::tab_style(true)));
        } else {
            spans.push(Span::styled(label, styles::muted_style()));
        }
    }

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::muted_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_main_content(frame: &mut Frame, app: &App, area: Rect) {
    match app.current_tab {
        Tab::Library => render_library(frame, app, area),
        Tab::Reading => render_reading(frame, app, area),
        Tab::Timer => render_timer(frame, app, area),
    }
}

fn render_library(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(Span::styled(
            format!(" Your books ({}) ", app.books.len()),
            styles::title_style(),
        ));

    if app.books.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  No books yet.",
                styles::muted_style(),
            )),
            Line::from(vec![
                Span::raw("  Press "),
                Span::styled("a", styles::help_key_style()),
                Span::raw(" to add a PDF from disk."),
            ]),
        ])
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = app
        .books
        .iter()
        .map(|book| {
            let added = book
                .added_at
                .as_deref()
                .map(format_date)
                .unwrap_or_else(|| "-".to_string());
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {:<40}", truncate(&book.title, 40)),
                    styles::list_item_style(),
                ),
                Span::styled(format!("{:<14}", book.display_pages()), styles::muted_style()),
                Span::styled(added, styles::muted_style()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(styles::selected_style());

    let mut state = ListState::default();
    state.select(Some(app.book_selection));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_reading(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(Span::styled(" Reading ", styles::title_style()));

    let Some(ref reading) = app.reading else {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("  Nothing open.", styles::muted_style())),
            Line::from(vec![
                Span::raw("  Pick a book in the Library tab and press "),
                Span::styled("Enter", styles::help_key_style()),
                Span::raw("."),
            ]),
        ])
        .block(block);
        frame.render_widget(hint, area);
        return;
    };

    let total = reading.book.total_pages;
    let percent = if total > 0 {
        reading.current_page * 100 / total
    } else {
        0
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", reading.book.title),
            styles::title_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Page "),
            Span::styled(
                format!("{}", reading.current_page),
                styles::highlight_style(),
            ),
            Span::raw(format!(" of {}   ({}%)", total, percent)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("n", styles::help_key_style()),
            Span::raw(" next page  "),
            Span::styled("p", styles::help_key_style()),
            Span::raw(" previous page  "),
            Span::styled("space", styles::help_key_style()),
            Span::raw(" pause/resume"),
        ]),
    ];

    if reading.paused {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  Session paused",
            styles::error_style(),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_timer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .title(Span::styled(" Focus timer ", styles::title_style()));

    let mut lines = vec![Line::from("")];

    match (&app.timer, app.timer_remaining()) {
        (Some(timer), Some(remaining)) => {
            let phase = timer
                .phase
                .map(|p| p.as_str().to_string())
                .unwrap_or_else(|| "?".to_string());
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format_countdown(remaining), styles::title_style()),
                Span::raw(format!("  ({})", phase)),
                Span::styled(
                    if timer.is_paused() { "  paused" } else { "" },
                    styles::error_style(),
                ),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("space", styles::help_key_style()),
                Span::raw(" pause/resume"),
            ]));
        }
        _ => {
            lines.push(Line::from(vec![
                Span::raw("  Next block: "),
                Span::styled(app.timer_phase.as_str(), styles::highlight_style()),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled("s", styles::help_key_style()),
                Span::raw(" start  "),
                Span::styled("b", styles::help_key_style()),
                Span::raw(" switch phase"),
            ]));
        }
    }

    if !app.active_timers.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  {} active timer(s) on the backend", app.active_timers.len()),
            styles::muted_style(),
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let shortcuts = "[u]pdate | [x] dismiss | [o] sign out | [q]uit";

    let left_text = if let Some(ref msg) = app.status_message {
        format!(" {} ", msg)
    } else {
        String::from(" Ready ")
    };
    let right_text = format!(" {} ", shortcuts);

    let padding = (area.width as usize)
        .saturating_sub(left_text.len())
        .saturating_sub(right_text.len());
    let status_line = Line::from(vec![
        Span::styled(left_text, styles::muted_style()),
        Span::raw(" ".repeat(padding)),
        Span::styled(right_text, styles::muted_style()),
    ]);

    frame.render_widget(
        Paragraph::new(status_line).style(styles::status_bar_style()),
        area,
    );
}

fn render_sign_in_overlay(frame: &mut Frame, app: &App) {
    let height = if app.auth_error.is_some() { 13 } else { 11 };
    let area = centered_rect_fixed(52, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("   QuizRead", styles::title_style())),
        Line::from(Span::styled(
            format!("   {}", app.auth_mode.title()),
            styles::muted_style(),
        )),
        Line::from(""),
    ];

    let email_focused = app.auth_focus == AuthFocus::Email;
    let email_display = format!("{:<28}", truncate(&app.auth_email, 28));
    let cursor = if email_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Email:    [", styles::muted_style()),
        Span::styled(
            format!("{}{}", email_display, cursor),
            if email_focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            },
        ),
        Span::styled("]", styles::muted_style()),
    ]));

    let password_focused = app.auth_focus == AuthFocus::Password;
    let masked: String = "*".repeat(app.auth_password.len().min(28));
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("   "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(
            format!("{:<28}{}", masked, cursor),
            if password_focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            },
        ),
        Span::styled("]", styles::muted_style()),
    ]));

    lines.push(Line::from(""));
    let button_focused = app.auth_focus == AuthFocus::Button;
    let label = format!(" {} ", app.auth_mode.title());
    lines.push(Line::from(vec![
        Span::raw("   ["),
        Span::styled(
            if button_focused {
                format!("▶{}◀", label)
            } else {
                format!(" {} ", label)
            },
            if button_focused {
                styles::selected_style()
            } else {
                styles::list_item_style()
            },
        ),
        Span::raw("]"),
    ]));

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   Ctrl+R", styles::help_key_style()),
        Span::styled(
            format!(" switch to {}", app.auth_mode.toggle().title().to_lowercase()),
            styles::muted_style(),
        ),
    ]));

    if let Some(ref error) = app.auth_error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("   {}", truncate(error, 46)),
            styles::error_style(),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quiz_overlay(frame: &mut Frame, app: &App) {
    let Some(ref active) = app.quiz else { return };

    let height = (9 + active.quiz.options.len() as u16).min(frame.area().height);
    let area = centered_rect_fixed(60, height, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        Line::from(Span::styled("  Checkpoint quiz", styles::title_style())),
        Line::from(""),
        Line::from(Span::raw(format!("  {}", active.quiz.question))),
        Line::from(""),
    ];

    for (i, option) in active.quiz.options.iter().enumerate() {
        let marker = if i == active.selection { "▶" } else { " " };
        let style = if i == active.selection {
            styles::selected_style()
        } else {
            styles::list_item_style()
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {} ", marker)),
            Span::styled(format!("{}. {}", i + 1, truncate(option, 50)), style),
        ]));
    }

    lines.push(Line::from(""));
    match active.answered {
        Some(true) => lines.push(Line::from(Span::styled(
            "  Correct! Press Enter to continue.",
            styles::success_style(),
        ))),
        Some(false) => lines.push(Line::from(Span::styled(
            "  Not quite. Press Enter to continue.",
            styles::error_style(),
        ))),
        None => lines.push(Line::from(vec![
            Span::styled("  ↑/↓", styles::help_key_style()),
            Span::styled(" choose  ", styles::muted_style()),
            Span::styled("Enter", styles::help_key_style()),
            Span::styled(" answer", styles::muted_style()),
        ])),
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }).block(block), area);
}

fn render_annotation_overlay(frame: &mut Frame, app: &App) {
    let Some(ref prompt) = app.annotation else { return };

    let area = centered_rect_fixed(60, 10, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("  Annotation prompt", styles::title_style())),
        Line::from(""),
        Line::from(Span::styled(
            format!("  {}", truncate(&prompt.context, 54)),
            styles::muted_style(),
        )),
        Line::from(Span::raw("  What are the key ideas so far?")),
        Line::from(""),
        Line::from(vec![
            Span::raw("  > "),
            Span::styled(
                format!("{}▌", truncate(&prompt.input, 50)),
                styles::list_item_style(),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter", styles::help_key_style()),
            Span::styled(" save  ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" skip", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_path_input_overlay(frame: &mut Frame, app: &App) {
    let Some(ref path) = app.path_input else { return };

    let area = centered_rect_fixed(62, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("  Add a book", styles::title_style())),
        Line::from(Span::styled("  Path to a PDF file:", styles::muted_style())),
        Line::from(vec![
            Span::raw("  > "),
            Span::styled(format!("{}▌", truncate(path, 54)), styles::list_item_style()),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter", styles::help_key_style()),
            Span::styled(" upload  ", styles::muted_style()),
            Span::styled("Esc", styles::help_key_style()),
            Span::styled(" cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_quit_overlay(frame: &mut Frame) {
    let area = centered_rect_fixed(46, 7, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::styled("   QuizRead", styles::title_style())),
        Line::from(""),
        Line::from(Span::styled(
            "   Are you sure you want to quit?",
            styles::highlight_style(),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("   Press ", styles::muted_style()),
            Span::styled("[Y]", styles::help_key_style()),
            Span::styled(" to quit, ", styles::muted_style()),
            Span::styled("[N]", styles::help_key_style()),
            Span::styled(" to cancel", styles::muted_style()),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Stack the live notifications in the top-right corner, oldest first.
fn render_notifications(frame: &mut Frame, app: &App) {
    let items = app.notifications.items();
    if items.is_empty() {
        return;
    }

    let frame_area = frame.area();
    let width: u16 = 38;
    let height: u16 = 4;
    let x = frame_area.width.saturating_sub(width + 1);

    for (i, notification) in items.iter().take(4).enumerate() {
        let y = 1 + (i as u16) * height;
        if y + height > frame_area.height {
            break;
        }
        let area = Rect::new(x, y, width, height);
        frame.render_widget(Clear, area);

        let style = match notification.kind {
            NotificationKind::Success => styles::success_style(),
            NotificationKind::Error => styles::error_style(),
            NotificationKind::Info => styles::highlight_style(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(Span::styled(
                format!(" {} ", truncate(&notification.title, 30)),
                style,
            ));

        let body = Paragraph::new(Line::from(Span::raw(truncate(
            &notification.message,
            (width as usize).saturating_sub(4),
        ))))
        .wrap(Wrap { trim: true })
        .block(block);

        frame.render_widget(body, area);
    }
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
