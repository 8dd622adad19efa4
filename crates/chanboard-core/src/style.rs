//! Per-section stylesheet lookup
//!
//! Section 2 reads `section2_style.toml`, every other page `style.toml`.
//! A missing or malformed stylesheet is a warning; rendering falls back to
//! the built-in palette.

use crate::error::CoreError;
use crate::models::Section;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Colour overrides, each as `#rrggbb`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleSheet {
    pub accent: Option<String>,
    pub text: Option<String>,
    pub muted: Option<String>,
    pub border: Option<String>,
    pub warning: Option<String>,
    /// Per-metric colour keyed by metric slug ("total_views")
    pub metrics: BTreeMap<String, String>,
}

impl StyleSheet {
    /// Colour for a metric card, falling back to the catalog default
    pub fn metric_color<'a>(&'a self, slug: &str, default: &'a str) -> &'a str {
        self.metrics.get(slug).map(String::as_str).unwrap_or(default)
    }
}

/// Stylesheet plus the warning raised while looking it up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedStyle {
    pub sheet: StyleSheet,
    pub path: PathBuf,
    pub warning: Option<CoreError>,
}

/// File consulted for the active section
pub fn style_path(style_dir: &Path, section: Option<Section>) -> PathBuf {
    let file = match section {
        Some(Section::B) => Section::B.style_file(),
        _ => Section::A.style_file(),
    };
    style_dir.join(file)
}

/// Read and parse a stylesheet
///
/// # Errors
/// `StyleResourceMissing` when the file cannot be read or is not valid TOML.
/// The reason carries the I/O or parse message.
pub fn load_style(path: &Path) -> Result<StyleSheet, CoreError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| CoreError::style_missing(path, e.to_string()))?;
    toml::from_str(&content)
        .map_err(|e| CoreError::style_missing(path, format!("malformed TOML: {}", e.message())))
}

/// Look up the stylesheet for a section; never fails
pub fn resolve_style(style_dir: &Path, section: Option<Section>) -> ResolvedStyle {
    let path = style_path(style_dir, section);
    match load_style(&path) {
        Ok(sheet) => {
            debug!(path = %path.display(), "Stylesheet loaded");
            ResolvedStyle {
                sheet,
                path,
                warning: None,
            }
        }
        Err(e) => {
            warn!(error = %e, "Stylesheet unavailable, using built-in palette");
            ResolvedStyle {
                sheet: StyleSheet::default(),
                path,
                warning: Some(e),
            }
        }
    }
}

/// Parse `#rrggbb` (or `rrggbb`) into RGB components
pub fn parse_hex_color(raw: &str) -> Option<(u8, u8, u8)> {
    let hex = raw.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}
