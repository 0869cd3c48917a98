// UI module for rendering the TUI.
// Contains widgets for tabs, the login form, schedule and profile views.

mod list;
mod login;
mod profile;
mod schedule;
mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::{App, Screen, Tab};
use crate::cache::CACHE_PREFIX;

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    if app.screen == Screen::Login {
        login::draw_login(frame, &app.login);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Tab bar
            Constraint::Min(1),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    match app.active_tab {
        Tab::Schedule => schedule::draw_schedule_tab(frame, app, chunks[1]),
        Tab::Profile => profile::draw_profile_tab(frame, app, chunks[1]),
    }

    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

/// Draw the status bar with keybinding hints and saved data counts.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = Vec::new();
    if app.active_tab == Tab::Schedule {
        hints.extend([
            Span::raw(" ←→ "),
            Span::styled("Day", Style::default().fg(Color::DarkGray)),
            Span::raw("  m "),
            Span::styled("Month", Style::default().fg(Color::DarkGray)),
            Span::raw("  t "),
            Span::styled("Today", Style::default().fg(Color::DarkGray)),
            Span::raw(" "),
        ]);
    }
    hints.extend([
        Span::raw(" Tab "),
        Span::styled("Switch", Style::default().fg(Color::DarkGray)),
        Span::raw("  r "),
        Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
        Span::raw("  L "),
        Span::styled("Sign out", Style::default().fg(Color::DarkGray)),
        Span::raw("  ? "),
        Span::styled("Help", Style::default().fg(Color::DarkGray)),
        Span::raw("  q "),
        Span::styled("Quit", Style::default().fg(Color::DarkGray)),
    ]);

    let saved = app.services.store.stats(CACHE_PREFIX);
    if saved.total > 0 {
        let saved_color = if saved.expired > 0 {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        hints.push(Span::styled(
            format!("  Saved: {} ({} fresh)", saved.total, saved.fresh),
            Style::default().fg(saved_color),
        ));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50.min(area.width);
    let popup_height = 17.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let shortcuts = [
        ("  ↑/↓ or j/k    ", "Select lesson"),
        ("  ←/→ or h/l    ", "Previous / next day"),
        ("  t             ", "Back to today"),
        ("  m             ", "Toggle month view"),
        ("  Tab           ", "Switch tabs"),
        ("  r             ", "Refresh current view"),
        ("  L             ", "Sign out and clear saved data"),
        ("  ?             ", "Show/hide this help"),
        ("  q             ", "Quit"),
    ];

    let mut help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];
    help_text.extend(shortcuts.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(*key, Style::default().fg(Color::Cyan)),
            Span::raw(*action),
        ])
    }));
    help_text.extend([
        Line::from(""),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" or ", Style::default().fg(Color::DarkGray)),
            Span::styled("?", Style::default().fg(Color::Yellow)),
            Span::styled(" to close", Style::default().fg(Color::DarkGray)),
        ]),
    ]);

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::api::AuthClient;
    use crate::app::Services;
    use crate::cache::{CacheStore, SCHEDULE_TODAY, ttl};
    use crate::session::Session;
    use crate::storage::{MemoryStorage, Storage};
    use crate::testing::{MockTransport, lesson};

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app(storage: Arc<MemoryStorage>) -> App {
        let session = Session::restore(storage.clone());
        let client = AuthClient::new(Arc::new(MockTransport::new(Vec::new())), session);
        let services = Services::new(CacheStore::new(storage), client);
        App::new(services, NaiveDate::from_ymd_opt(2026, 3, 2).unwrap())
    }

    #[tokio::test]
    async fn test_login_screen_renders_form() {
        let mut app = app(Arc::new(MemoryStorage::new()));
        let screen = rendered(&mut app);
        assert!(screen.contains("Sign in"));
        assert!(screen.contains("Username"));
    }

    #[tokio::test]
    async fn test_stale_lessons_render_with_refresh_line() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set("access_token", "abc").unwrap();
        CacheStore::new(storage.clone()).set(SCHEDULE_TODAY, &vec![lesson("Algebra")], ttl::SCHEDULE);

        let mut app = app(storage);
        let screen = rendered(&mut app);

        assert!(screen.contains("Algebra"));
        assert!(screen.contains("Refreshing"));
        assert!(screen.contains("Saved: 1 (1 fresh)"));
    }
}
