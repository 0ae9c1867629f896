//! Background worker loops
//!
//! Each worker rechecks the run flag at the top of every iteration and
//! suspends via a timed sleep (or a timed channel wait for the system tap),
//! so shutdown completes within one period. All shared-state access happens
//! inside the data lock; network sends happen outside it.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use super::{run_progress_check, EngineState};
use crate::domain::{Notification, NotificationKind};
use crate::notify::NotifyTransport;
use crate::watcher::{FileWatcher, WatchEvent};

/// Fixed phrase set for ambient notifications.
const AMBIENT_PHRASES: &[&str] = &[
    "You're crushing it today!",
    "Smooth boot sequence detected",
    "System purring like a kitten",
    "Achievement streak active",
    "Lumen OS loves you back",
    "Battery optimization master",
    "Kernel threads dancing happily",
    "Wayland compositor flexing",
    "Memory pressure minimal",
    "You're a system wizard",
];

/// Activity summary notifications fire when the event counter crosses a
/// multiple of this step.
const SYSTEM_SUMMARY_STEP: u64 = 50;

/// How long the system tap waits before rechecking the run flag.
const TAP_WAIT: Duration = Duration::from_secs(1);

/// Uniformly-ish random value in `0..bound` from the OS entropy source.
/// Falls back to 0 if the entropy source is unavailable.
fn random_below(bound: u32) -> u32 {
    let mut buf = [0u8; 4];
    if getrandom::getrandom(&mut buf).is_err() {
        return 0;
    }
    u32::from_le_bytes(buf) % bound
}

/// Periodic achievement evaluation (default every 5 s).
pub(super) fn achievement_worker(state: Arc<EngineState>) {
    let period = Duration::from_millis(state.config().intervals.check_ms);
    debug!("Achievement worker started");

    while state.is_enabled() {
        {
            let mut data = state.lock_data();
            run_progress_check(&mut data);
        }
        thread::sleep(period);
    }
    debug!("Achievement worker stopped");
}

/// Queue drain plus ambient injection (default every 2 s).
///
/// At most one queued notification goes out per tick; that bounds the
/// dispatch rate and is documented behavior, not an accident. Ambient
/// messages bypass the queue entirely so neither path starves the other.
pub(super) fn dispatcher_worker(state: Arc<EngineState>, transport: NotifyTransport) {
    let period = Duration::from_millis(state.config().intervals.dispatch_ms);
    let ambient_chance = u32::from(state.config().ambient_chance_pct.min(100));
    debug!("Notification dispatcher started");

    while state.is_enabled() {
        // Dequeue under the lock, send after releasing it
        let next = state.lock_data().queue.pop();
        if let Some(notification) = next {
            if let Err(e) = transport.send(&notification) {
                // At-most-once: never retried, never re-queued
                warn!("Notification delivery failed: {e}");
            }
        }

        if random_below(100) < ambient_chance {
            let phrase = AMBIENT_PHRASES[random_below(AMBIENT_PHRASES.len() as u32) as usize];
            let ambient = Notification::new(NotificationKind::Random, phrase, 2);
            if let Err(e) = transport.send(&ambient) {
                debug!("Ambient notification delivery failed: {e}");
            }
        }

        thread::sleep(period);
    }
    debug!("Notification dispatcher stopped");
}

/// Simulated/external activity tap (default every 5 s): accumulates a
/// variable activity delta and queues a summary whenever the counter
/// crosses a multiple-of-50 boundary.
pub(super) fn activity_listener(state: Arc<EngineState>) {
    let period = Duration::from_millis(state.config().intervals.activity_ms);
    debug!("Activity listener started");

    while state.is_enabled() {
        let delta = u64::from(random_below(10));
        {
            let mut data = state.lock_data();
            let before = data.counters.activity_events;
            data.counters.activity_events += delta;
            let after = data.counters.activity_events;

            // Capacity check avoids building a notification the full queue
            // would drop anyway
            if before / SYSTEM_SUMMARY_STEP != after / SYSTEM_SUMMARY_STEP
                && data.queue.has_capacity()
            {
                let summary = Notification::new(
                    NotificationKind::System,
                    format!("Activity events: {after} processed"),
                    1,
                );
                data.queue.push(summary);
            }
        }
        thread::sleep(period);
    }
    debug!("Activity listener stopped");
}

/// OS activity tap: waits on change notifications for the configured system
/// counter file and re-runs the progress check inline, so kernel-driven
/// activity can trigger unlocks without waiting for the periodic worker.
pub(super) fn system_tap(state: Arc<EngineState>) {
    let path = state.config().system_counter_path.clone();
    let watcher = match FileWatcher::new(&path, 500) {
        Ok(watcher) => watcher,
        Err(e) => {
            warn!("System counter tap unavailable ({}): {e:#}", path.display());
            return;
        }
    };
    debug!("System tap started on {}", path.display());

    while state.is_enabled() {
        // Timed wait keeps this loop cancellable: a plain blocking read
        // could outlive shutdown until the next external event
        match watcher.recv_timeout(TAP_WAIT) {
            Some(WatchEvent::Changed(_)) => {
                let mut data = state.lock_data();
                run_progress_check(&mut data);
            }
            Some(WatchEvent::Error(e)) => warn!("System tap watch error: {e}"),
            None => {}
        }
    }
    debug!("System tap stopped");
}
