//! Section page - one card per metric, side by side

use crate::components::metric_card;
use crate::theme::Palette;
use chanboard_core::view::SectionView;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::Paragraph,
};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    view: &SectionView,
    selected: usize,
    palette: &Palette,
) {
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

    if view.cards.is_empty() {
        let empty = Paragraph::new("No metrics configured for this section")
            .style(Style::default().fg(palette.muted));
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let constraints = vec![Constraint::Ratio(1, view.cards.len() as u32); view.cards.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(chunks[1]);

    for (idx, (card, column)) in view.cards.iter().zip(columns.iter()).enumerate() {
        metric_card::render(frame, *column, card, idx == selected, palette);
    }
}
