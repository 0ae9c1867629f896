//! Engine state, progress checking, and worker lifecycle
//!
//! The whole engine shares one [`EngineState`]: a run flag plus a single
//! mutex over catalog, queue, and counters. The coarse lock is intentional —
//! workers tick at human-scale periods, so correctness simplicity wins over
//! throughput. Network I/O never happens under the lock; the persistence
//! write does (it serializes the catalog it is protecting, and saves only
//! happen on unlock events).

mod evaluator;
mod workers;

pub use evaluator::{qualifying_unlocks, CounterSnapshot};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::{Notification, NotificationKind};
use crate::notify::{NotificationQueue, NotifyTransport};
use crate::store::AchievementStore;

/// External activity counters, mutated by workers under the data lock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityCounters {
    /// Progress-check heartbeats since startup
    pub boot_count: u64,
    /// Events accumulated by the activity listeners
    pub activity_events: u64,
}

impl ActivityCounters {
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            boot_count: self.boot_count,
            activity_events: self.activity_events,
        }
    }
}

/// Everything the workers share under the single data lock.
pub struct EngineData {
    pub store: AchievementStore,
    pub queue: NotificationQueue,
    pub counters: ActivityCounters,
}

/// Process-wide engine state, explicitly constructed and shared via `Arc`
/// into every worker at startup.
pub struct EngineState {
    enabled: AtomicBool,
    data: Mutex<EngineData>,
    config: Config,
}

impl EngineState {
    /// Build the engine state from a startup config snapshot and a loaded
    /// catalog. The run flag starts from `config.enabled`.
    pub fn new(config: Config, store: AchievementStore) -> Self {
        Self {
            enabled: AtomicBool::new(config.enabled),
            data: Mutex::new(EngineData {
                store,
                queue: NotificationQueue::new(),
                counters: ActivityCounters::default(),
            }),
            config,
        }
    }

    /// Whether workers should keep looping. Checked at the top of every
    /// worker iteration (cooperative cancellation).
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
    }

    /// Signal all workers to stop after their current iteration.
    pub fn disable(&self) {
        self.set_enabled(false);
    }

    /// Startup configuration snapshot (paths and intervals are fixed for
    /// the life of the engine; only `enabled` is live, via the run flag).
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Acquire the single data lock.
    pub fn lock_data(&self) -> MutexGuard<'_, EngineData> {
        self.data.lock().expect("engine data lock poisoned")
    }
}

/// One progress-check pass: bump the boot heartbeat, evaluate the catalog
/// against the current counters, and for every newly qualifying id unlock
/// it, enqueue the unlock notification, and persist the store.
///
/// Caller holds the data lock. Both the periodic achievement worker and the
/// OS activity tap run this, so the unlock idempotency gate in the store is
/// what guarantees exactly-once notifications.
pub fn run_progress_check(data: &mut EngineData) {
    data.counters.boot_count += 1;

    let snapshot = data.counters.snapshot();
    let due = evaluator::qualifying_unlocks(data.store.entries(), &snapshot);

    for id in due {
        if !data.store.unlock(&id) {
            continue;
        }
        let message = match data.store.get(&id) {
            Some(entry) => {
                info!(id = %id, name = %entry.name, "Achievement unlocked");
                format!(
                    "\u{1F3C6} Achievement Unlocked: {}!\n{}",
                    entry.name, entry.description
                )
            }
            None => continue,
        };

        data.queue
            .push(Notification::new(NotificationKind::Achievement, message, 5));

        if let Err(e) = data.store.save() {
            // Keep running on in-memory state; the next unlock retries
            warn!("Failed to persist achievement state: {e:#}");
        }
    }
}

/// Owns the worker threads: start all, signal stop, join all, final flush.
pub struct EngineController {
    state: Arc<EngineState>,
    workers: Vec<JoinHandle<()>>,
}

impl EngineController {
    pub fn new(state: Arc<EngineState>) -> Self {
        Self {
            state,
            workers: Vec::new(),
        }
    }

    pub fn state(&self) -> &Arc<EngineState> {
        &self.state
    }

    /// Spawn the four background workers.
    pub fn start(&mut self, transport: NotifyTransport) {
        let state = self.state.clone();
        self.spawn("achievements", move || workers::achievement_worker(state));

        let state = self.state.clone();
        self.spawn("dispatcher", move || {
            workers::dispatcher_worker(state, transport)
        });

        let state = self.state.clone();
        self.spawn("activity", move || workers::activity_listener(state));

        let state = self.state.clone();
        self.spawn("system-tap", move || workers::system_tap(state));

        debug!("Started {} workers", self.workers.len());
    }

    fn spawn<F>(&mut self, name: &str, body: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match std::thread::Builder::new()
            .name(format!("sweetexp-{name}"))
            .spawn(body)
        {
            Ok(handle) => self.workers.push(handle),
            Err(e) => warn!("Failed to spawn {name} worker: {e}"),
        }
    }

    /// Clear the run flag, join every worker, and take a final save so no
    /// unlocked-but-unpersisted state is lost on the way out.
    pub fn shutdown(&mut self) {
        self.state.disable();
        for handle in self.workers.drain(..) {
            let name = handle.thread().name().unwrap_or("worker").to_string();
            if handle.join().is_err() {
                warn!("{name} panicked before shutdown");
            }
        }

        let data = self.state.lock_data();
        if let Err(e) = data.store.save() {
            warn!("Final achievement save failed: {e:#}");
        }
        info!("Engine stopped");
    }
}
