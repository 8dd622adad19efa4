//! chanboard-core - Core library for chanboard
//!
//! Loads a YouTube channel CSV, aggregates it into calendar periods and
//! builds the page view models the TUI and CLI render.

pub mod analytics;
pub mod chart;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod format;
pub mod models;
pub mod parsers;
pub mod session;
pub mod store;
pub mod style;
pub mod view;
pub mod watcher;

pub use config::DashboardConfig;
pub use error::{CoreError, LoadReport};
pub use event::{DataEvent, EventBus};
pub use export::{export_series, export_series_to_csv, export_series_to_json, ExportFormat};
pub use session::DashboardSession;
pub use store::DataStore;
pub use view::{render, PageView, RenderOptions};
pub use watcher::FileWatcher;
