//! Unlock qualification
//!
//! Pure decision logic: given the catalog and a snapshot of the external
//! activity counters, which achievements newly qualify for unlock. All
//! mutation (unlocking, queueing, persisting) happens in the caller, under
//! the engine data lock.

use crate::domain::Achievement;

/// Snapshot of the external counters consumed by evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    /// Progress-check heartbeats since startup (boot counter)
    pub boot_count: u64,
    /// Events accumulated by the activity listeners
    pub activity_events: u64,
}

/// Return the ids of achievements that newly qualify for unlock.
///
/// Deterministic and side-effect-free; never returns an id that is already
/// unlocked. An achievement qualifies when its driving counter has reached
/// its target.
pub fn qualifying_unlocks(catalog: &[Achievement], counters: &CounterSnapshot) -> Vec<String> {
    catalog
        .iter()
        .filter(|entry| !entry.unlocked)
        .filter(|entry| counter_for(entry, counters) >= u64::from(entry.target))
        .map(|entry| entry.id.clone())
        .collect()
}

/// Map an achievement to the counter that drives it. Ids without a known
/// external counter fall back to their stored progress field, so future
/// achievements with store-driven progress work without evaluator changes.
fn counter_for(entry: &Achievement, counters: &CounterSnapshot) -> u64 {
    match entry.id.as_str() {
        "boot_master" => counters.boot_count,
        "wayland_pro" => counters.activity_events,
        _ => u64::from(entry.progress),
    }
}
