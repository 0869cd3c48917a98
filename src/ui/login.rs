// Login form rendering.
// Draws a centered credentials form with the last attempt's outcome.

use ratatui::{prelude::*, widgets::*};

use crate::error::FALLBACK_LOGIN_MESSAGE;
use crate::state::{LoadStatus, LoginField, LoginState};

/// Draw the login form in the middle of the screen.
pub fn draw_login(frame: &mut Frame, form: &LoginState) {
    let area = frame.area();

    let modal_width = 50.min(area.width);
    let modal_height = 11.min(area.height);
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    frame.render_widget(Clear, modal_area);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Sign in ")
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    let inner = outer.inner(modal_area);
    frame.render_widget(outer, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Length(1), // Outcome
            Constraint::Min(1),    // Instructions
        ])
        .split(inner);

    let masked = "•".repeat(form.password.chars().count());
    draw_input(
        frame,
        chunks[0],
        "Username",
        &form.username,
        form.focus == LoginField::Username,
    );
    draw_input(
        frame,
        chunks[1],
        "Password",
        &masked,
        form.focus == LoginField::Password,
    );

    let attempt = form.attempt.lock();
    let outcome = match attempt.status {
        LoadStatus::Loading => Some(Span::styled(
            "⏳ Signing in...",
            Style::default().fg(Color::Yellow),
        )),
        LoadStatus::Error => Some(Span::styled(
            format!(
                "❌ {}",
                attempt.error.as_deref().unwrap_or(FALLBACK_LOGIN_MESSAGE)
            ),
            Style::default().fg(Color::Red),
        )),
        LoadStatus::Idle | LoadStatus::Success => None,
    };
    drop(attempt);
    if let Some(span) = outcome {
        frame.render_widget(
            Paragraph::new(Line::from(span)).alignment(Alignment::Center),
            chunks[2],
        );
    }

    let instructions = Line::from(vec![
        Span::styled(" Enter", Style::default().fg(Color::Yellow)),
        Span::styled(" = Next/Submit  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Tab", Style::default().fg(Color::Yellow)),
        Span::styled(" = Switch  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" = Quit ", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(
        Paragraph::new(instructions).alignment(Alignment::Center),
        chunks[3],
    );
}

fn draw_input(frame: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {} ", label));

    let mut spans = vec![Span::raw(value.to_string())];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}
