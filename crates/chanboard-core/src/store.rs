//! Load-once data store for the channel dataset
//!
//! The dataset is parsed on first access and shared as `Arc<Dataset>` for
//! every later render. `invalidate()` drops the cached copy so the next
//! access re-reads the file.

use crate::error::{CoreError, LoadError, LoadReport};
use crate::event::{DataEvent, EventBus, EVENT_CAPACITY};
use crate::models::Dataset;
use crate::parsers::ChannelCsvParser;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Central data store for chanboard
pub struct DataStore {
    /// Path to the channel CSV
    data_path: PathBuf,

    parser: ChannelCsvParser,

    /// Memoized dataset (None until first load or after invalidation)
    dataset: RwLock<Option<Arc<Dataset>>>,

    /// Number of times the file was actually parsed
    load_count: AtomicUsize,

    /// Event bus for notifying subscribers
    event_bus: EventBus,
}

impl DataStore {
    pub fn new(data_path: PathBuf, parser: ChannelCsvParser) -> Self {
        Self {
            data_path,
            parser,
            dataset: RwLock::new(None),
            load_count: AtomicUsize::new(0),
            event_bus: EventBus::new(EVENT_CAPACITY),
        }
    }

    /// Create with the default CSV parser
    pub fn with_defaults(data_path: PathBuf) -> Self {
        Self::new(data_path, ChannelCsvParser::new())
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// Get the event bus for subscribing to updates
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Whether a parsed dataset is currently cached
    pub fn is_loaded(&self) -> bool {
        self.dataset.read().is_some()
    }

    /// How many times the file has been parsed
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::Relaxed)
    }

    /// Return the cached dataset, loading it on first use
    ///
    /// # Errors
    /// `DataUnavailable` if the file cannot be loaded. Nothing is cached on
    /// failure, so the next call retries.
    pub fn dataset(&self) -> Result<Arc<Dataset>, CoreError> {
        if let Some(ds) = self.dataset.read().as_ref() {
            return Ok(Arc::clone(ds));
        }

        let mut guard = self.dataset.write();
        // Another caller may have loaded while we waited for the write lock
        if let Some(ds) = guard.as_ref() {
            return Ok(Arc::clone(ds));
        }

        let loaded = Arc::new(self.parser.parse(&self.data_path)?);
        self.load_count.fetch_add(1, Ordering::Relaxed);
        *guard = Some(Arc::clone(&loaded));
        debug!(rows = loaded.len(), "Dataset cached");
        Ok(loaded)
    }

    /// Drop the cached dataset; the next `dataset()` call re-reads the file
    ///
    /// Publishes `DatasetChanged` even when nothing was cached, since a failed
    /// reload leaves the slot empty.
    pub fn invalidate(&self) {
        let had_data = self.dataset.write().take().is_some();
        info!(path = %self.data_path.display(), had_data, "Dataset cache invalidated");
        self.event_bus.publish(DataEvent::DatasetChanged);
    }

    /// Initial load with a report for the startup screen
    pub fn initial_load(&self) -> LoadReport {
        let mut report = LoadReport::new();
        info!(path = %self.data_path.display(), "Starting initial data load");

        match self.dataset() {
            Ok(ds) => {
                report.dataset_loaded = true;
                report.rows_loaded = ds.len();
                if ds.is_empty() {
                    report.add_warning("dataset", "Dataset has no rows");
                }
                self.event_bus.publish(DataEvent::LoadCompleted);
            }
            Err(e) => {
                warn!(error = %e, "Initial load failed");
                report.add_error(LoadError::from_core_error("dataset", &e));
            }
        }

        report
    }
}
