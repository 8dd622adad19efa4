//! Welcome page - dataset summary and section menu

use crate::theme::Palette;
use chanboard_core::view::WelcomeView;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// `keys` pairs each section in `view.sections` with the key that opens it
pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: &WelcomeView,
    keys: &[String],
    palette: &Palette,
) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical[1]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.accent))
        .title(Span::styled(
            format!(" {} ", view.title),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));

    let span = match (view.first_date, view.last_date) {
        (Some(first), Some(last)) => format!("{} days of data, {} to {}", view.rows, first, last),
        _ => "The dataset has no rows".to_string(),
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(span, Style::default().fg(palette.muted))),
        Line::from(""),
    ];
    for (idx, (_, heading)) in view.sections.iter().enumerate() {
        let key = keys.get(idx).map(String::as_str).unwrap_or("?");
        lines.push(Line::from(vec![
            Span::styled("[", Style::default().fg(palette.muted)),
            Span::styled(
                key.to_string(),
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("] ", Style::default().fg(palette.muted)),
            Span::styled(heading.clone(), Style::default().fg(palette.text)),
        ]));
    }

    let body = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    frame.render_widget(body, horizontal[1]);
}
