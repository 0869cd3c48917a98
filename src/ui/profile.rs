// Profile tab rendering.

use ratatui::{prelude::*, widgets::*};

use crate::api::{PointBalance, UserInfo};
use crate::app::App;

use super::list::{render_status_line, render_without_data, split_status_line};

/// Draw the profile tab.
pub fn draw_profile_tab(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.profile.user.snapshot();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Profile ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(user) = state.data.as_ref() else {
        render_without_data(frame, inner, &state, "profile");
        return;
    };

    let (body_area, status_area) = split_status_line(inner, &state);
    frame.render_widget(Paragraph::new(profile_lines(user)), body_area);

    if let Some(status_area) = status_area {
        render_status_line(frame, status_area, &state);
    }
}

fn profile_lines(user: &UserInfo) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(Span::styled(
            user.full_name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Student ID", user.student_id.to_string()),
        field("Age", user.age.to_string()),
        field("Group", user.group.name.clone()),
        field("Stream", user.stream.name.clone()),
        field("Level", user.level.to_string()),
        field("Diamonds", balance(&user.points.diamonds)),
        field("Coins", balance(&user.points.coins)),
    ];

    let optional = [
        ("Birthday", user.birthday.clone()),
        ("Study form", user.study_form.clone()),
        ("Registered", user.registered_at.clone()),
        ("Last seen", user.last_seen_at.clone()),
        ("Achievements", user.achieves_count.map(|n| n.to_string())),
    ];
    lines.extend(
        optional
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| field(label, v))),
    );

    if user.is_debtor {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "⚠ Tuition payment overdue",
            Style::default().fg(Color::Red),
        )));
    }
    if user.has_homework_issues {
        lines.push(Line::from(Span::styled(
            "⚠ Homework waiting for resubmission",
            Style::default().fg(Color::Yellow),
        )));
    }
    lines
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<14}", label), Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn balance(points: &PointBalance) -> String {
    format!(
        "{} (earned {}, spent {})",
        points.balance, points.earned, points.spent
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_format() {
        let points = PointBalance {
            earned: 40,
            spent: 10,
            balance: 30,
        };
        assert_eq!(balance(&points), "30 (earned 40, spent 10)");
    }
}
