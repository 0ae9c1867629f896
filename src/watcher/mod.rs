//! Debounced file-change watcher
//!
//! Used in two places: the control loop polls it for config file changes,
//! and the OS activity tap blocks on it (with a timeout, so shutdown stays
//! deterministic) for changes to the system counter file.

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, DebounceEventResult, DebouncedEventKind};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

/// Events from the file watcher
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// The watched path was modified or replaced
    Changed(PathBuf),
    /// An error occurred
    Error(String),
}

/// Watches a single path and emits debounced change events.
pub struct FileWatcher {
    /// Channel to receive watch events
    rx: mpsc::Receiver<WatchEvent>,
    /// The watcher itself (kept alive)
    _watcher: notify_debouncer_mini::Debouncer<notify::RecommendedWatcher>,
}

impl FileWatcher {
    /// Create a new watcher for the given path.
    pub fn new(path: &Path, debounce_ms: u64) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let tx_clone = tx.clone();
        let mut debouncer = new_debouncer(
            Duration::from_millis(debounce_ms),
            move |res: DebounceEventResult| match res {
                Ok(events) => {
                    for event in events {
                        if matches!(
                            event.kind,
                            DebouncedEventKind::Any | DebouncedEventKind::AnyContinuous
                        ) {
                            let _ = tx_clone.send(WatchEvent::Changed(event.path));
                        }
                    }
                }
                Err(e) => {
                    let _ = tx_clone.send(WatchEvent::Error(e.to_string()));
                }
            },
        )?;

        debouncer
            .watcher()
            .watch(path, notify::RecursiveMode::NonRecursive)?;

        Ok(Self {
            rx,
            _watcher: debouncer,
        })
    }

    /// Try to receive a watch event (non-blocking).
    pub fn try_recv(&self) -> Option<WatchEvent> {
        self.rx.try_recv().ok()
    }

    /// Wait for a watch event, giving up after `timeout`. Returns None on
    /// timeout so callers can recheck their run flag.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<WatchEvent> {
        self.rx.recv_timeout(timeout).ok()
    }
}
