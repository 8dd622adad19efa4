//! Toast notifications for reloads, style warnings and degraded widgets

use chanboard_core::error::ErrorSeverity;
use chanboard_core::CoreError;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::time::{Duration, Instant};

/// How many toasts stack on screen at once
const MAX_VISIBLE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Warning,
    Error,
    Info,
}

impl ToastKind {
    pub fn color(&self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Warning => Color::Yellow,
            Self::Error => Color::Red,
            Self::Info => Color::Cyan,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Error => "✗",
            Self::Info => "ℹ",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        // Errors linger longer than confirmations
        let duration = match kind {
            ToastKind::Error | ToastKind::Warning => Duration::from_secs(5),
            ToastKind::Success | ToastKind::Info => Duration::from_secs(3),
        };
        Self {
            message: message.into(),
            kind,
            created_at: Instant::now(),
            duration,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Warning)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }

    /// Toast for a library error, typed by its severity
    pub fn from_error(error: &CoreError) -> Self {
        let kind = match error.severity() {
            ErrorSeverity::Warning => ToastKind::Warning,
            ErrorSeverity::Error | ErrorSeverity::Fatal => ToastKind::Error,
        };
        Self::new(error.to_string(), kind)
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.created_at) > self.duration
    }
}

/// Stack of live toasts, newest last
#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toast unless the same message is already showing
    pub fn push(&mut self, toast: Toast) {
        if self.toasts.iter().any(|t| t.message == toast.message) {
            return;
        }
        self.toasts.push(toast);
    }

    pub fn clear_expired(&mut self) {
        let now = Instant::now();
        self.toasts.retain(|t| !t.is_expired_at(now));
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// Draw the newest toasts bottom-centered over `area`
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.clear_expired();

        let skip = self.toasts.len().saturating_sub(MAX_VISIBLE);
        let visible = &self.toasts[skip..];
        if visible.is_empty() {
            return;
        }

        let toast_height: u16 = 3;
        let mut y = area
            .height
            .saturating_sub(visible.len() as u16 * toast_height + 2);

        for toast in visible {
            let width = (toast.message.chars().count() + 6).min(area.width as usize) as u16;
            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(width) / 2,
                y: area.y + y,
                width,
                height: toast_height.min(area.height),
            };
            render_single_toast(frame, toast_area, toast);
            y += toast_height;
        }
    }
}

fn render_single_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
    let color = toast.kind.color();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let content = Line::from(vec![
        Span::styled(
            format!("{} ", toast.kind.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(toast.message.as_str(), Style::default().fg(Color::White)),
    ]);
    frame.render_widget(Paragraph::new(content).alignment(Alignment::Center), inner);
}
