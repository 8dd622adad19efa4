//! Metric detail page - a single large chart

use crate::components::metric_card;
use crate::theme::Palette;
use chanboard_core::view::MetricDetailView;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

pub fn render(frame: &mut Frame, area: Rect, view: &MetricDetailView, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    let heading = Paragraph::new(Span::styled(
        view.heading.as_str(),
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(heading, chunks[0]);

    metric_card::render(frame, chunks[1], &view.card, true, palette);
}
