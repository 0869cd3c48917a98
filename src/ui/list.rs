// Shared rendering for data-backed views.
// Provides loading, error and empty states plus the inline refresh line.

use ratatui::{prelude::*, widgets::*};

use crate::error::FALLBACK_LOAD_MESSAGE;
use crate::state::{LoadStatus, ResourceState};

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Render the state of a resource that has no data to show yet.
pub fn render_without_data<T>(frame: &mut Frame, area: Rect, state: &ResourceState<T>, what: &str) {
    match state.status {
        LoadStatus::Idle => render_empty(frame, area, "Press r to load"),
        LoadStatus::Loading => render_loading(frame, area, &format!("Loading {}", what)),
        LoadStatus::Error => render_error(
            frame,
            area,
            state.error.as_deref().unwrap_or(FALLBACK_LOAD_MESSAGE),
        ),
        LoadStatus::Success => render_empty(frame, area, "Nothing here"),
    }
}

/// Split off a one-line strip for the refresh status, if one is needed.
///
/// Data already on screen stays visible while a refresh runs or after it fails.
pub fn split_status_line<T>(area: Rect, state: &ResourceState<T>) -> (Rect, Option<Rect>) {
    if !state.is_loading() && !state.is_error() {
        return (area, None);
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);
    (chunks[0], Some(chunks[1]))
}

/// Render the inline refresh status under existing data.
pub fn render_status_line<T>(frame: &mut Frame, area: Rect, state: &ResourceState<T>) {
    let line = match state.status {
        LoadStatus::Loading => Line::from(Span::styled(
            " ⏳ Refreshing...",
            Style::default().fg(Color::Yellow),
        )),
        LoadStatus::Error => Line::from(vec![
            Span::styled(
                format!(
                    " ❌ {}",
                    state.error.as_deref().unwrap_or(FALLBACK_LOAD_MESSAGE)
                ),
                Style::default().fg(Color::Red),
            ),
            Span::styled("  (showing saved data)", Style::default().fg(Color::DarkGray)),
        ]),
        LoadStatus::Idle | LoadStatus::Success => return,
    };
    frame.render_widget(Paragraph::new(line), area);
}
