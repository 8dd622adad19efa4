use crate::theme::Palette;
use chanboard_core::models::metric::title_from_slug;
use chanboard_core::models::{NavigationState, Page};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// A single breadcrumb in the navigation path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Breadcrumb {
    pub label: String,
    /// Nesting level (0 = welcome)
    pub level: usize,
}

impl Breadcrumb {
    pub fn new(label: impl Into<String>, level: usize) -> Self {
        Self {
            label: label.into(),
            level,
        }
    }
}

/// Trail derived from where the user is: Dashboard > Section 1 > Total Views
pub fn trail(nav: &NavigationState) -> Vec<Breadcrumb> {
    let mut path = vec![Breadcrumb::new("Dashboard", 0)];

    if matches!(nav.page(), Page::Section | Page::MetricDetail) {
        if let Some(section) = nav.section() {
            path.push(Breadcrumb::new(section.short_name(), 1));
        }
    }
    if nav.page() == Page::MetricDetail {
        if let Some(metric) = nav.metric() {
            path.push(Breadcrumb::new(title_from_slug(metric), 2));
        }
    }

    path
}

/// Render the trail as one line, current location highlighted
pub fn render(frame: &mut Frame, area: Rect, path: &[Breadcrumb], palette: &Palette) {
    let mut spans = vec![Span::styled("📍 ", Style::default().fg(palette.accent))];

    for (idx, crumb) in path.iter().enumerate() {
        let is_last = idx + 1 == path.len();
        let style = if is_last {
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(crumb.label.clone(), style));
        if !is_last {
            spans.push(Span::styled(" > ", Style::default().fg(palette.muted)));
        }
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
