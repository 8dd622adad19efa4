//! File watcher for the channel CSV
//!
//! Watches the dataset's directory with notify and invalidates the store
//! when the file is rewritten. A burst of events (truncate, write, rename)
//! collapses into one invalidation once the file has been quiet for the
//! debounce delay.

use crate::event::DataEvent;
use crate::store::DataStore;
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep, Instant};
use tracing::{debug, error, info, trace};

/// Configuration for the file watcher
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Quiet period after the last file event before invalidating
    pub debounce_delay: Duration,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_delay: Duration::from_millis(500),
        }
    }
}

/// File watcher that invalidates the data store on change
pub struct FileWatcher {
    /// Notify watcher instance
    _watcher: RecommendedWatcher,

    /// Shutdown signal
    shutdown_tx: mpsc::Sender<()>,
}

impl FileWatcher {
    /// Start watching the store's data file
    pub async fn start(
        store: Arc<DataStore>,
        config: WatcherConfig,
    ) -> Result<Self, notify::Error> {
        let (event_tx, mut event_rx) = mpsc::channel::<notify::Result<Event>>(100);
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = event_tx.blocking_send(res);
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        let data_path = store.data_path().to_path_buf();
        let watch_dir = data_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;
        info!(
            dir = %watch_dir.display(),
            file = %data_path.display(),
            "File watcher started"
        );

        let event_bus = store.event_bus().clone();
        let delay = config.debounce_delay;
        tokio::spawn(async move {
            let quiet = sleep(delay);
            tokio::pin!(quiet);
            let mut pending = false;

            loop {
                tokio::select! {
                    Some(result) = event_rx.recv() => {
                        match result {
                            Ok(event) if Self::touches_data_file(&event, &data_path) => {
                                trace!(kind = ?event.kind, "Dataset event, restarting debounce");
                                pending = true;
                                quiet.as_mut().reset(Instant::now() + delay);
                            }
                            Ok(_) => {}
                            Err(e) => {
                                error!(error = %e, "File watcher error");
                                event_bus.publish(DataEvent::WatcherError(e.to_string()));
                            }
                        }
                    }
                    () = &mut quiet, if pending => {
                        pending = false;
                        debug!(path = %data_path.display(), "Dataset file changed");
                        store.invalidate();
                    }
                    _ = shutdown_rx.recv() => {
                        info!("File watcher shutting down");
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            shutdown_tx,
        })
    }

    /// Whether a notify event is a create/modify/remove of the data file
    fn touches_data_file(event: &Event, data_path: &Path) -> bool {
        match event.kind {
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
            _ => return false,
        }

        let wanted = data_path.file_name();
        event.paths.iter().any(|p| p.file_name() == wanted)
    }

    /// Stop the watcher
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}
