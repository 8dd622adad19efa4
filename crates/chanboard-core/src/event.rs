//! Change notifications from the data layer to the UI

use tokio::sync::broadcast;

/// Slots kept per receiver before a lagging one starts missing events
pub const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEvent {
    /// The dataset was read for the first time
    LoadCompleted,
    /// The CSV changed on disk and the cached rows were dropped
    DatasetChanged,
    WatcherError(String),
}

/// Fan-out of [`DataEvent`]s; every clone publishes to the same receivers
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DataEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn publish(&self, event: DataEvent) {
        // Err only means nobody is listening yet
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataEvent> {
        self.sender.subscribe()
    }
}
