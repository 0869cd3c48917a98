// Schedule tab rendering.
// Lists lessons for the selected day or month.

use ratatui::{prelude::*, widgets::*};

use crate::api::LessonItem;
use crate::app::App;
use crate::state::ScheduleView;

use super::list::{render_empty, render_status_line, render_without_data, split_status_line};

/// Draw the schedule tab.
pub fn draw_schedule_tab(frame: &mut Frame, app: &mut App, area: Rect) {
    let schedule = &mut app.schedule;
    let month = matches!(schedule.view, ScheduleView::Month(_));
    let state = schedule.lessons.snapshot();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" {} ", schedule.title()))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(lessons) = state.data.as_ref() else {
        render_without_data(frame, inner, &state, "schedule");
        return;
    };

    let (list_area, status_area) = split_status_line(inner, &state);
    if lessons.is_empty() {
        render_empty(frame, list_area, "No classes");
    } else {
        let items: Vec<ListItem> = lessons
            .iter()
            .map(|lesson| ListItem::new(lesson_line(lesson, month)))
            .collect();

        let list_widget = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        frame.render_stateful_widget(list_widget, list_area, &mut schedule.list_state);
    }

    if let Some(status_area) = status_area {
        render_status_line(frame, status_area, &state);
    }
}

fn lesson_line(lesson: &LessonItem, with_date: bool) -> Line<'_> {
    let mut spans = Vec::new();
    if with_date {
        spans.push(Span::styled(
            format!("{}  ", lesson.date),
            Style::default().fg(Color::Magenta),
        ));
    }
    spans.extend([
        Span::styled(
            format!("{:>2}. ", lesson.lesson),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{}-{}  ", lesson.started_at, lesson.finished_at),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(lesson.subject.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            format!("  room {}", lesson.room),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("  {}", lesson.teacher),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    Line::from(spans)
}
