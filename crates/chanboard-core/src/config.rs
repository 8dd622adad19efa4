//! Dashboard configuration
//!
//! Read from `--config`, else `<config dir>/chanboard/config.toml`. A
//! missing file means defaults; CLI flags override individual fields.

use crate::error::CoreError;
use crate::models::{ChartKind, Granularity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Dataset file name used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "youtube_channel_data.csv";

/// Color scheme for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    /// Dark theme (default): Black bg, White fg
    #[default]
    Dark,
    /// Light theme: White bg, Black fg
    Light,
}

/// chanboard settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Channel CSV
    pub data_path: PathBuf,
    /// Directory holding `style.toml` / `section2_style.toml`
    pub style_dir: PathBuf,
    pub default_granularity: Granularity,
    pub default_chart_kind: ChartKind,
    /// Chart height on section cards, in rows
    pub card_chart_height: u16,
    /// Chart height on the metric detail page, in rows
    pub detail_chart_height: u16,
    pub color_scheme: ColorScheme,
    /// Key overrides for the TUI, e.g. `"Ctrl+G" = "cycle_granularity"`
    pub keybindings: BTreeMap<String, String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            style_dir: PathBuf::from("."),
            default_granularity: Granularity::Daily,
            default_chart_kind: ChartKind::Bar,
            card_chart_height: 8,
            detail_chart_height: 20,
            color_scheme: ColorScheme::Dark,
            keybindings: BTreeMap::new(),
        }
    }
}

impl DashboardConfig {
    /// `<config dir>/chanboard/config.toml`, if a config dir exists
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("chanboard").join("config.toml"))
    }

    /// Load from `path`; a missing file yields defaults
    ///
    /// # Errors
    /// `InvalidConfig` when the file exists but is not valid TOML for this
    /// schema.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(CoreError::InvalidConfig {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };

        let config: Self = toml::from_str(&content).map_err(|e| CoreError::InvalidConfig {
            path: path.to_path_buf(),
            message: e.message().to_string(),
        })?;
        config.validate(path)?;
        debug!(path = %path.display(), "Config loaded");
        Ok(config)
    }

    /// Load from the explicit path, else the default location, else defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, CoreError> {
        match explicit.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Persist to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let write_err = |message: String| CoreError::FileWrite {
            path: path.to_path_buf(),
            message,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| write_err(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| write_err(e.to_string()))
    }

    fn validate(&self, path: &Path) -> Result<(), CoreError> {
        if self.card_chart_height == 0 || self.detail_chart_height == 0 {
            return Err(CoreError::InvalidConfig {
                path: path.to_path_buf(),
                message: "chart heights must be at least 1 row".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = DashboardConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_FILE));
    }

    #[test]
    fn test_partial_file_merges_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_path = \"/data/channel.csv\"\n\
             default_granularity = \"weekly\"\n\
             default_chart_kind = \"area\"\n\
             \n\
             [keybindings]\n\
             \"Ctrl+G\" = \"cycle_granularity\"\n",
        )
        .unwrap();

        let config = DashboardConfig::load(&path).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/data/channel.csv"));
        assert_eq!(config.default_granularity, Granularity::Weekly);
        assert_eq!(config.default_chart_kind, ChartKind::Area);
        assert_eq!(config.card_chart_height, 8);
        assert_eq!(
            config.keybindings.get("Ctrl+G").map(String::as_str),
            Some("cycle_granularity")
        );
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        std::fs::write(&path, "default_granularity = \"hourly\"\n").unwrap();
        assert!(matches!(
            DashboardConfig::load(&path),
            Err(CoreError::InvalidConfig { .. })
        ));

        std::fs::write(&path, "card_chart_height = 0\n").unwrap();
        assert!(matches!(
            DashboardConfig::load(&path),
            Err(CoreError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = DashboardConfig {
            color_scheme: ColorScheme::Light,
            detail_chart_height: 30,
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(DashboardConfig::load(&path).unwrap(), config);
    }
}
