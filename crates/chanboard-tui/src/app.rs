//! TUI Application state and key handling

use crate::components::{Toast, ToastManager};
use crate::keybindings::{KeyAction, KeyBindings};
use crate::theme::Palette;
use chanboard_core::config::ColorScheme;
use chanboard_core::models::{Dataset, MetricCatalog, NavAction, Page, Section};
use chanboard_core::style::resolve_style;
use chanboard_core::view::{render, PageView, RenderOptions};
use chanboard_core::{DashboardConfig, DashboardSession, DataEvent, DataStore};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// TUI Application state
pub struct App {
    /// Data store reference
    pub store: Arc<DataStore>,

    /// Event receiver for data updates
    pub event_rx: broadcast::Receiver<DataEvent>,

    pub config: DashboardConfig,
    pub catalog: MetricCatalog,

    /// Snapshot currently on screen; kept when a reload fails
    pub dataset: Arc<Dataset>,

    pub session: DashboardSession,
    pub keybindings: KeyBindings,

    /// Colors for the active section's stylesheet
    pub palette: Palette,

    /// Section the palette was resolved for (`Some(None)` = welcome page)
    styled_for: Option<Option<Section>>,

    /// Highlighted card on a section page
    pub selected_card: usize,

    pub toasts: ToastManager,

    /// Reference date for the incomplete-period check
    pub today: NaiveDate,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(
        store: Arc<DataStore>,
        dataset: Arc<Dataset>,
        config: DashboardConfig,
        today: NaiveDate,
    ) -> Self {
        let event_rx = store.event_bus().subscribe();
        let session = DashboardSession::from_config(&dataset, &config, today);
        let mut keybindings = KeyBindings::new();
        keybindings.load_custom(&config.keybindings);

        let mut app = Self {
            store,
            event_rx,
            palette: Palette::new(config.color_scheme, Default::default()),
            config,
            catalog: MetricCatalog::default(),
            dataset,
            session,
            keybindings,
            styled_for: None,
            selected_card: 0,
            toasts: ToastManager::new(),
            today,
            should_quit: false,
        };
        app.refresh_style();
        app
    }

    /// Current page as a view model
    pub fn view(&self) -> PageView {
        render(
            &self.session,
            &self.dataset,
            &self.catalog,
            self.today,
            RenderOptions::from_config(&self.config),
        )
    }

    /// Handle keyboard input. Returns true if the key was bound.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match self.keybindings.get_action(code, modifiers) {
            Some(action) => {
                self.apply(action);
                true
            }
            None => false,
        }
    }

    pub fn apply(&mut self, action: KeyAction) {
        debug!(?action, "Key action");
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::OpenSection1 => self.navigate(NavAction::OpenSection(Section::A)),
            KeyAction::OpenSection2 => self.navigate(NavAction::OpenSection(Section::B)),
            KeyAction::NextCard => self.move_selection(1),
            KeyAction::PrevCard => self.move_selection(-1),
            KeyAction::OpenMetric => {
                if let Some(title) = self.selected_metric_title() {
                    self.navigate(NavAction::OpenMetric(title));
                }
            }
            KeyAction::Back => self.navigate(NavAction::Back),
            KeyAction::CycleGranularity => self.session.filter.cycle_granularity(),
            KeyAction::ToggleChartKind => self.session.filter.toggle_chart_kind(),
            KeyAction::StartEarlier => self.session.filter.shift_start(-1),
            KeyAction::StartLater => self.session.filter.shift_start(1),
            KeyAction::EndEarlier => self.session.filter.shift_end(-1),
            KeyAction::EndLater => self.session.filter.shift_end(1),
            KeyAction::ResetFilter => self.session.filter.reset_range(),
            KeyAction::ThemeToggle => {
                self.config.color_scheme = match self.config.color_scheme {
                    ColorScheme::Dark => ColorScheme::Light,
                    ColorScheme::Light => ColorScheme::Dark,
                };
                self.styled_for = None;
                self.refresh_style();
            }
        }
    }

    fn navigate(&mut self, action: NavAction) {
        let opening_section = matches!(action, NavAction::OpenSection(_));
        if self.session.navigate(action, &self.catalog) {
            if opening_section {
                self.selected_card = 0;
            }
            self.refresh_style();
        }
    }

    fn move_selection(&mut self, step: isize) {
        if self.session.page() != Page::Section {
            return;
        }
        let count = self
            .session
            .section()
            .map(|s| self.catalog.metrics(s).len())
            .unwrap_or(0);
        if count == 0 {
            return;
        }
        let next = (self.selected_card as isize + step).rem_euclid(count as isize);
        self.selected_card = next as usize;
    }

    fn selected_metric_title(&self) -> Option<String> {
        let section = self.session.section()?;
        self.catalog
            .metrics(section)
            .get(self.selected_card)
            .map(|m| m.title.clone())
    }

    /// Reload the section stylesheet if the active section changed
    pub fn refresh_style(&mut self) {
        let section = match self.session.page() {
            Page::Welcome => None,
            Page::Section | Page::MetricDetail => self.session.section(),
        };
        if self.styled_for == Some(section) {
            return;
        }

        let resolved = resolve_style(&self.config.style_dir, section);
        if let Some(warning) = &resolved.warning {
            self.toasts.push(Toast::from_error(warning));
        }
        self.palette = Palette::new(self.config.color_scheme, resolved.sheet);
        self.styled_for = Some(section);
    }

    /// Check for data events (non-blocking)
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                DataEvent::DatasetChanged => self.reload(),
                DataEvent::WatcherError(msg) => {
                    self.toasts.push(Toast::error(format!("Watcher error: {}", msg)));
                }
                DataEvent::LoadCompleted => {}
            }
        }
    }

    /// Swap in the re-read dataset; on failure keep showing the old one
    pub fn reload(&mut self) {
        match self.store.dataset() {
            Ok(dataset) => {
                info!(rows = dataset.len(), "Dataset reloaded");
                self.session.on_dataset_reloaded(&dataset);
                self.toasts
                    .push(Toast::success(format!("Dataset reloaded ({} rows)", dataset.len())));
                self.dataset = dataset;
            }
            Err(e) => {
                warn!(error = %e, "Reload failed, keeping previous dataset");
                self.toasts.push(Toast::error(format!("Reload failed: {}", e)));
            }
        }
    }
}
