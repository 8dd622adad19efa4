//! chanboard-tui - TUI frontend for chanboard using Ratatui

pub mod app;
pub mod components;
pub mod keybindings;
pub mod pages;
pub mod theme;
pub mod ui;

pub use app::App;

use anyhow::{Context, Result};
use chanboard_core::watcher::WatcherConfig;
use chanboard_core::{DashboardConfig, DataStore, FileWatcher};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Run the TUI application
///
/// The dataset must load before the terminal is touched: a missing or
/// malformed CSV is returned as an error and nothing is drawn.
pub async fn run(store: Arc<DataStore>, config: DashboardConfig) -> Result<()> {
    let dataset = store
        .dataset()
        .with_context(|| format!("Failed to load {}", store.data_path().display()))?;

    // Live reload is best effort
    let watcher = match FileWatcher::start(store.clone(), WatcherConfig::default()).await {
        Ok(w) => Some(w),
        Err(e) => {
            warn!(error = %e, "File watcher unavailable, live reload disabled");
            None
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let today = chrono::Local::now().date_naive();
    let mut app = App::new(store, dataset, config, today);

    let result = run_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Some(watcher) = watcher {
        watcher.stop().await;
    }

    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    <B as Backend>::Error: Send + Sync + 'static,
{
    loop {
        // Pick up reloads from the watcher
        app.poll_events();
        app.today = chrono::Local::now().date_naive();

        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
