//! Keybindings for chanboard TUI
//!
//! Supports:
//! - Default bindings for navigation and the chart filter
//! - Overrides from the `[keybindings]` table of config.toml
//! - Reverse lookup for the status bar hints

use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Actions that can be triggered by keyboard shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Quit,
    /// Open "Section 1: All-Time Statistics"
    OpenSection1,
    /// Open "Section 2: Engagement Statistics"
    OpenSection2,
    NextCard,
    PrevCard,
    /// Drill into the selected metric
    OpenMetric,
    Back,
    CycleGranularity,
    ToggleChartKind,
    StartEarlier,
    StartLater,
    EndEarlier,
    EndLater,
    ResetFilter,
    ThemeToggle,
}

impl KeyAction {
    /// Get all possible actions
    pub fn all() -> &'static [KeyAction] {
        &[
            KeyAction::Quit,
            KeyAction::OpenSection1,
            KeyAction::OpenSection2,
            KeyAction::NextCard,
            KeyAction::PrevCard,
            KeyAction::OpenMetric,
            KeyAction::Back,
            KeyAction::CycleGranularity,
            KeyAction::ToggleChartKind,
            KeyAction::StartEarlier,
            KeyAction::StartLater,
            KeyAction::EndEarlier,
            KeyAction::EndLater,
            KeyAction::ResetFilter,
            KeyAction::ThemeToggle,
        ]
    }

    /// Action name used in config.toml
    pub fn name(&self) -> &'static str {
        match self {
            KeyAction::Quit => "quit",
            KeyAction::OpenSection1 => "open_section_1",
            KeyAction::OpenSection2 => "open_section_2",
            KeyAction::NextCard => "next_card",
            KeyAction::PrevCard => "prev_card",
            KeyAction::OpenMetric => "open_metric",
            KeyAction::Back => "back",
            KeyAction::CycleGranularity => "cycle_granularity",
            KeyAction::ToggleChartKind => "toggle_chart_kind",
            KeyAction::StartEarlier => "start_earlier",
            KeyAction::StartLater => "start_later",
            KeyAction::EndEarlier => "end_earlier",
            KeyAction::EndLater => "end_later",
            KeyAction::ResetFilter => "reset_filter",
            KeyAction::ThemeToggle => "theme_toggle",
        }
    }

    /// Short label for the status bar
    pub fn description(&self) -> &'static str {
        match self {
            KeyAction::Quit => "quit",
            KeyAction::OpenSection1 => "section 1",
            KeyAction::OpenSection2 => "section 2",
            KeyAction::NextCard => "next card",
            KeyAction::PrevCard => "prev card",
            KeyAction::OpenMetric => "open",
            KeyAction::Back => "back",
            KeyAction::CycleGranularity => "time frame",
            KeyAction::ToggleChartKind => "chart type",
            KeyAction::StartEarlier => "start -1d",
            KeyAction::StartLater => "start +1d",
            KeyAction::EndEarlier => "end -1d",
            KeyAction::EndLater => "end +1d",
            KeyAction::ResetFilter => "reset range",
            KeyAction::ThemeToggle => "theme",
        }
    }

    /// Parse action from config name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        Self::all().iter().copied().find(|a| a.name() == name)
    }
}

/// Key with modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct KeyWithMods {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyWithMods {
    fn plain(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

/// Keybindings system
pub struct KeyBindings {
    /// Default keybindings (immutable)
    defaults: HashMap<KeyWithMods, KeyAction>,
    /// Custom keybindings from config.toml (override defaults)
    custom: HashMap<KeyWithMods, KeyAction>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create new keybindings with defaults
    pub fn new() -> Self {
        let plain = [
            (KeyCode::Char('q'), KeyAction::Quit),
            (KeyCode::Char('1'), KeyAction::OpenSection1),
            (KeyCode::Char('2'), KeyAction::OpenSection2),
            (KeyCode::Right, KeyAction::NextCard),
            (KeyCode::Left, KeyAction::PrevCard),
            (KeyCode::Enter, KeyAction::OpenMetric),
            (KeyCode::Esc, KeyAction::Back),
            (KeyCode::Backspace, KeyAction::Back),
            (KeyCode::Char('g'), KeyAction::CycleGranularity),
            (KeyCode::Char('c'), KeyAction::ToggleChartKind),
            (KeyCode::Char('['), KeyAction::StartEarlier),
            (KeyCode::Char(']'), KeyAction::StartLater),
            (KeyCode::Char('{'), KeyAction::EndEarlier),
            (KeyCode::Char('}'), KeyAction::EndLater),
            (KeyCode::Char('r'), KeyAction::ResetFilter),
        ];

        let mut defaults: HashMap<KeyWithMods, KeyAction> = plain
            .into_iter()
            .map(|(code, action)| (KeyWithMods::plain(code), action))
            .collect();

        // Theme toggle (Ctrl+T)
        defaults.insert(
            KeyWithMods {
                code: KeyCode::Char('t'),
                modifiers: KeyModifiers::CONTROL,
            },
            KeyAction::ThemeToggle,
        );

        Self {
            defaults,
            custom: HashMap::new(),
        }
    }

    /// Load custom keybindings from config.toml
    ///
    /// Format: `[keybindings]` with `"Ctrl+G" = "cycle_granularity"` entries
    pub fn load_custom(&mut self, keybindings: &BTreeMap<String, String>) {
        for (key_str, action_str) in keybindings {
            let key_with_mods = match parse_key(key_str) {
                Ok(k) => k,
                Err(e) => {
                    warn!(key = %key_str, error = %e, "Failed to parse keybinding");
                    continue;
                }
            };

            let Some(action) = KeyAction::from_name(action_str) else {
                warn!(key = %key_str, action = %action_str, "Unknown keybinding action");
                continue;
            };

            self.custom.insert(key_with_mods, action);
        }
    }

    /// Get action for a key press
    pub fn get_action(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
        let key = KeyWithMods { code, modifiers };
        if let Some(action) = self.custom.get(&key).or_else(|| self.defaults.get(&key)) {
            return Some(*action);
        }

        // Terminals report '{' and '}' with SHIFT held
        if modifiers == KeyModifiers::SHIFT && matches!(code, KeyCode::Char(_)) {
            let key = KeyWithMods::plain(code);
            return self.custom.get(&key).or_else(|| self.defaults.get(&key)).copied();
        }
        None
    }

    /// Get key string for an action (for the status bar)
    ///
    /// Custom bindings win; among several keys the shortest label is used
    pub fn get_key_for_action(&self, action: KeyAction) -> Option<String> {
        let lookup = |map: &HashMap<KeyWithMods, KeyAction>| {
            map.iter()
                .filter(|(_, act)| **act == action)
                .map(|(key, _)| format_key(key.code, key.modifiers))
                .min_by_key(|label| (label.len(), label.clone()))
        };
        lookup(&self.custom).or_else(|| lookup(&self.defaults))
    }
}

/// Parse key string from config.toml
///
/// Examples:
/// - "Ctrl+G" → KeyCode::Char('g') + CONTROL
/// - "F5" → KeyCode::F(5)
/// - "Enter" → KeyCode::Enter
fn parse_key(s: &str) -> Result<KeyWithMods, String> {
    let parts: Vec<String> = s.trim().split('+').map(|p| p.trim().to_lowercase()).collect();
    let Some((key_part, modifier_parts)) = parts.split_last() else {
        return Err("Empty key string".to_string());
    };

    let mut modifiers = KeyModifiers::NONE;
    for modifier in modifier_parts {
        match modifier.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", modifier)),
        }
    }

    let code = match key_part.as_str() {
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "backspace" => KeyCode::Backspace,
        "tab" => KeyCode::Tab,
        "space" => KeyCode::Char(' '),
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,

        k if k.len() > 1 && k.starts_with('f') => {
            let num: u8 = k[1..]
                .parse()
                .map_err(|_| format!("Invalid F-key: {}", k))?;
            if !(1..=12).contains(&num) {
                return Err(format!("F-key out of range (1-12): F{}", num));
            }
            KeyCode::F(num)
        }

        k => {
            let mut chars = k.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeyCode::Char(ch),
                _ => return Err(format!("Unknown key: {}", key_part)),
            }
        }
    };

    Ok(KeyWithMods { code, modifiers })
}

/// Format key for display
fn format_key(code: KeyCode, modifiers: KeyModifiers) -> String {
    let mut parts = Vec::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl".to_string());
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift".to_string());
    }
    if modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt".to_string());
    }

    let key_str = match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) if modifiers.is_empty() => c.to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        _ => "Unknown".to_string(),
    };

    parts.push(key_str);
    parts.join("+")
}
