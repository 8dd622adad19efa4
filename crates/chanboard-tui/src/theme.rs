//! Unified theme and color system for chanboard TUI
//!
//! Provides consistent color language across all pages:
//! - 🟢 Green: growth, loaded
//! - 🔴 Red: decline, error
//! - 🟡 Yellow: warning, incomplete period
//! - ⚪ Gray: neutral, muted text
//! - 🔵 Cyan: selected card, focus
//!
//! A section stylesheet can override the accent, text, muted, border and
//! warning colors, plus each metric's card color.

use chanboard_core::analytics::Delta;
use chanboard_core::config::ColorScheme;
use chanboard_core::style::{parse_hex_color, StyleSheet};
use ratatui::style::Color;

/// Status color palette following k9s/lazygit conventions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColor {
    Success,
    Error,
    Warning,
    Neutral,
    Focus,
}

impl StatusColor {
    /// Convert to Ratatui Color based on color scheme
    pub fn to_color(self, scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => match self {
                StatusColor::Success => Color::Green,
                StatusColor::Error => Color::Red,
                StatusColor::Warning => Color::Yellow,
                StatusColor::Neutral => Color::DarkGray,
                StatusColor::Focus => Color::Cyan,
            },
            ColorScheme::Light => match self {
                StatusColor::Success => Color::Rgb(0, 128, 0),
                StatusColor::Error => Color::Rgb(200, 0, 0),
                StatusColor::Warning => Color::Rgb(180, 120, 0),
                StatusColor::Neutral => Color::Gray,
                StatusColor::Focus => Color::Rgb(0, 128, 128),
            },
        }
    }
}

/// Delta direction semantic color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaColor {
    Up,
    Down,
    Flat,
}

impl DeltaColor {
    pub fn from_delta(delta: &Delta) -> Self {
        if delta.is_increase() {
            DeltaColor::Up
        } else if delta.is_decrease() {
            DeltaColor::Down
        } else {
            DeltaColor::Flat
        }
    }

    pub fn to_color(self, scheme: ColorScheme) -> Color {
        match self {
            DeltaColor::Up => StatusColor::Success.to_color(scheme),
            DeltaColor::Down => StatusColor::Error.to_color(scheme),
            DeltaColor::Flat => StatusColor::Neutral.to_color(scheme),
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            DeltaColor::Up => "▲",
            DeltaColor::Down => "▼",
            DeltaColor::Flat => "■",
        }
    }
}

/// Base color helpers for backgrounds and foregrounds
pub struct BaseColors;

impl BaseColors {
    /// Primary foreground/text color
    pub fn fg(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => Color::White,
            ColorScheme::Light => Color::Black,
        }
    }

    /// Muted/secondary text color
    pub fn muted(scheme: ColorScheme) -> Color {
        match scheme {
            ColorScheme::Dark => Color::DarkGray,
            ColorScheme::Light => Color::Gray,
        }
    }
}

/// `#rrggbb` to an RGB color
pub fn hex_to_color(raw: &str) -> Option<Color> {
    parse_hex_color(raw).map(|(r, g, b)| Color::Rgb(r, g, b))
}

/// Colors in effect for the current page
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub scheme: ColorScheme,
    pub accent: Color,
    pub text: Color,
    pub muted: Color,
    pub border: Color,
    pub warning: Color,
    sheet: StyleSheet,
}

impl Default for Palette {
    fn default() -> Self {
        Self::new(ColorScheme::Dark, StyleSheet::default())
    }
}

impl Palette {
    /// Built-in colors for `scheme`, overridden by whatever `sheet` sets
    pub fn new(scheme: ColorScheme, sheet: StyleSheet) -> Self {
        let pick = |value: &Option<String>, fallback: Color| {
            value.as_deref().and_then(hex_to_color).unwrap_or(fallback)
        };
        Self {
            scheme,
            accent: pick(&sheet.accent, StatusColor::Focus.to_color(scheme)),
            text: pick(&sheet.text, BaseColors::fg(scheme)),
            muted: pick(&sheet.muted, BaseColors::muted(scheme)),
            border: pick(&sheet.border, BaseColors::muted(scheme)),
            warning: pick(&sheet.warning, StatusColor::Warning.to_color(scheme)),
            sheet,
        }
    }

    /// Card color: stylesheet override, else the catalog color, else accent
    pub fn metric(&self, slug: &str, default_hex: &str) -> Color {
        hex_to_color(self.sheet.metric_color(slug, default_hex)).unwrap_or(self.accent)
    }

    pub fn delta(&self, delta: &Delta) -> Color {
        DeltaColor::from_delta(delta).to_color(self.scheme)
    }

    pub fn error(&self) -> Color {
        StatusColor::Error.to_color(self.scheme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_builtin_palette() {
        let palette = Palette::default();
        assert_eq!(palette.accent, Color::Cyan);
        assert_eq!(palette.text, Color::White);
        assert_eq!(palette.metric("total_views", "#FF9F36"), Color::Rgb(0xff, 0x9f, 0x36));
    }

    #[test]
    fn test_stylesheet_overrides() {
        let sheet = StyleSheet {
            accent: Some("#102030".into()),
            warning: Some("not-a-color".into()),
            metrics: BTreeMap::from([("total_likes".to_string(), "#00ff00".to_string())]),
            ..Default::default()
        };
        let palette = Palette::new(ColorScheme::Light, sheet);
        assert_eq!(palette.accent, Color::Rgb(0x10, 0x20, 0x30));
        // Unparsable override falls back to the scheme color
        assert_eq!(palette.warning, Color::Rgb(180, 120, 0));
        assert_eq!(palette.metric("total_likes", "#3F8EFC"), Color::Rgb(0, 0xff, 0));
        assert_eq!(palette.metric("total_shares", "bogus"), palette.accent);
    }

    #[test]
    fn test_delta_colors() {
        let up = Delta { absolute: 5.0, percent: 1.0 };
        let down = Delta { absolute: -5.0, percent: -1.0 };
        assert_eq!(DeltaColor::from_delta(&up), DeltaColor::Up);
        assert_eq!(DeltaColor::from_delta(&down), DeltaColor::Down);
        assert_eq!(DeltaColor::from_delta(&Delta::default()), DeltaColor::Flat);
        assert_eq!(DeltaColor::Up.icon(), "▲");
    }
}
