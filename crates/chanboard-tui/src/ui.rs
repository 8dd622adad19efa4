//! TUI rendering logic

use crate::app::App;
use crate::components::breadcrumbs;
use crate::keybindings::KeyAction;
use crate::pages::{metric_detail, section, welcome};
use chanboard_core::models::Page;
use chanboard_core::view::PageView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the full UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Logo + breadcrumbs
            Constraint::Min(0),    // Page
            Constraint::Length(1), // Status bar
        ])
        .split(size);

    render_header(frame, chunks[0], app);

    match app.view() {
        PageView::Welcome(view) => {
            let keys: Vec<String> = [KeyAction::OpenSection1, KeyAction::OpenSection2]
                .iter()
                .map(|a| app.keybindings.get_key_for_action(*a).unwrap_or_default())
                .collect();
            welcome::render(frame, chunks[1], &view, &keys, &app.palette);
        }
        PageView::Section(view) => {
            section::render(frame, chunks[1], &view, app.selected_card, &app.palette);
        }
        PageView::MetricDetail(view) => {
            metric_detail::render(frame, chunks[1], &view, &app.palette);
        }
    }

    render_status_bar(frame, chunks[2], app);

    app.toasts.render(frame, size);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let palette = &app.palette;
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let logo = Paragraph::new(Line::from(vec![
        Span::styled("◈ ", Style::default().fg(palette.accent)),
        Span::styled(
            "chanboard",
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.store.data_path().display()),
            Style::default().fg(palette.muted),
        ),
    ]));
    frame.render_widget(logo, rows[0]);

    let path = breadcrumbs::trail(&app.session.navigation);
    breadcrumbs::render(frame, rows[1], &path, palette);
}

/// Filter summary plus the keys that matter on this page
fn status_line(app: &App) -> Line<'static> {
    let palette = &app.palette;
    let filter = &app.session.filter;
    let key = |action: KeyAction| app.keybindings.get_key_for_action(action).unwrap_or_default();

    let mut spans = Vec::new();
    if app.session.page() != Page::Welcome {
        let range_style = if filter.is_inverted() {
            Style::default().fg(palette.error()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.text)
        };
        spans.push(Span::styled(
            format!(" {} │ {} │ ", filter.granularity, filter.chart_kind),
            Style::default().fg(palette.text),
        ));
        spans.push(Span::styled(
            format!("{} → {}", filter.start_date, filter.end_date),
            range_style,
        ));
        spans.push(Span::styled(" │", Style::default().fg(palette.muted)));
    }

    let actions: &[KeyAction] = match app.session.page() {
        Page::Welcome => &[KeyAction::OpenSection1, KeyAction::OpenSection2],
        Page::Section => &[
            KeyAction::PrevCard,
            KeyAction::NextCard,
            KeyAction::OpenMetric,
            KeyAction::Back,
            KeyAction::CycleGranularity,
            KeyAction::ToggleChartKind,
            KeyAction::ResetFilter,
        ],
        Page::MetricDetail => &[
            KeyAction::Back,
            KeyAction::CycleGranularity,
            KeyAction::ToggleChartKind,
            KeyAction::ResetFilter,
        ],
    };

    spans.push(Span::styled(
        format!(" {}", key(KeyAction::Quit)),
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled(" quit", Style::default().fg(palette.muted)));
    for action in actions {
        spans.push(Span::styled(" │ ", Style::default().fg(palette.muted)));
        spans.push(Span::styled(
            key(*action),
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!(" {}", action.description()),
            Style::default().fg(palette.muted),
        ));
    }
    if app.session.page() != Page::Welcome {
        spans.push(Span::styled(
            format!(
                " │ {}{} start │ {}{} end",
                key(KeyAction::StartEarlier),
                key(KeyAction::StartLater),
                key(KeyAction::EndEarlier),
                key(KeyAction::EndLater)
            ),
            Style::default().fg(palette.muted),
        ));
    }

    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    frame.render_widget(Paragraph::new(status_line(app)), area);
}
