//! One metric card: title, headline total, change, chart, incomplete note

use crate::components::metric_chart;
use crate::theme::{DeltaColor, Palette};
use chanboard_core::view::{MetricCard, Widget};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

/// Draw a card, or its error if the card degraded
pub fn render(
    frame: &mut Frame,
    area: Rect,
    widget: &Widget<MetricCard>,
    selected: bool,
    palette: &Palette,
) {
    match widget {
        Widget::Ready(card) => render_ready(frame, area, card, selected, palette),
        Widget::Degraded { title, error } => {
            let block = card_block(title, palette.error(), selected, palette);
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let text = vec![
                Line::from(Span::styled(
                    "✗ Unavailable",
                    Style::default().fg(palette.error()).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(error.to_string(), Style::default().fg(palette.muted))),
            ];
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
        }
    }
}

fn card_block<'a>(
    title: &'a str,
    color: ratatui::style::Color,
    selected: bool,
    palette: &Palette,
) -> Block<'a> {
    let border = if selected { palette.accent } else { palette.border };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(
            format!(" {} ", title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
}

fn render_ready(
    frame: &mut Frame,
    area: Rect,
    card: &MetricCard,
    selected: bool,
    palette: &Palette,
) {
    let color = palette.metric(&card.slug, &card.color);
    let block = card_block(&card.title, color, selected, palette);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let note_height = u16::from(card.incomplete_note.is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),           // Total
            Constraint::Length(1),           // Change
            Constraint::Min(3),              // Chart
            Constraint::Length(note_height), // Incomplete note
        ])
        .split(inner);

    let total = Paragraph::new(Line::from(Span::styled(
        card.total_label.as_str(),
        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(total, chunks[0]);

    let direction = DeltaColor::from_delta(&card.delta);
    let change = Paragraph::new(Line::from(vec![
        Span::styled("Change: ", Style::default().fg(palette.muted)),
        Span::styled(
            format!("{} {}", direction.icon(), card.delta_label),
            Style::default().fg(palette.delta(&card.delta)),
        ),
    ]));
    frame.render_widget(change, chunks[1]);

    let chart_area = Rect {
        height: chunks[2].height.min(card.chart.height),
        ..chunks[2]
    };
    metric_chart::render(frame, chart_area, &card.chart, color, palette);

    if let Some(note) = &card.incomplete_note {
        let caption = Paragraph::new(Span::styled(
            note.as_str(),
            Style::default().fg(palette.warning).add_modifier(Modifier::ITALIC),
        ));
        frame.render_widget(caption, chunks[3]);
    }
}
