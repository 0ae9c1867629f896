//! End-to-end scenarios for the progress check path: counters reach a
//! target, the achievement unlocks once, one notification is queued, and
//! the state is persisted.

mod common;

use sweetexp::engine::{run_progress_check, EngineState};
use sweetexp::store::AchievementStore;
use sweetexp::NotificationKind;
use tempfile::TempDir;

use common::test_config;

#[test]
fn boot_master_unlocks_exactly_once_at_target() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let data_path = config.data_path.clone();
    let state = EngineState::new(config, AchievementStore::load(&data_path));

    let mut data = state.lock_data();

    // One heartbeat short of the target: the check itself supplies the
    // tenth bump
    data.counters.boot_count = 9;
    run_progress_check(&mut data);

    let boot = data.store.get("boot_master").unwrap();
    assert!(boot.unlocked);
    assert!(boot.unlock_time > 0);
    let unlock_time = boot.unlock_time;

    // Exactly one queued notification, with the unlock payload shape
    assert_eq!(data.queue.len(), 1);
    let notification = data.queue.pop().unwrap();
    assert_eq!(notification.kind, NotificationKind::Achievement);
    assert_eq!(notification.priority, 5);
    assert!(notification.message.contains("Boot Master"));
    assert!(notification.message.contains("Boot 10 times successfully"));

    // The unlock was persisted
    let persisted = AchievementStore::load(&data_path);
    assert!(persisted.get("boot_master").unwrap().unlocked);

    // A second pass over the same condition fires nothing new
    run_progress_check(&mut data);
    assert!(data.queue.is_empty());
    assert_eq!(data.store.get("boot_master").unwrap().unlock_time, unlock_time);
}

#[test]
fn activity_counter_drives_wayland_pro() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let data_path = config.data_path.clone();
    let state = EngineState::new(config, AchievementStore::load(&data_path));

    let mut data = state.lock_data();

    data.counters.activity_events = 499;
    run_progress_check(&mut data);
    assert!(!data.store.get("wayland_pro").unwrap().unlocked);
    assert!(data.queue.is_empty());

    data.counters.activity_events = 500;
    run_progress_check(&mut data);
    assert!(data.store.get("wayland_pro").unwrap().unlocked);

    let notification = data.queue.pop().unwrap();
    assert_eq!(notification.kind, NotificationKind::Achievement);
    assert!(notification.message.contains("Wayland Pro"));
}

#[test]
fn unpersistable_store_does_not_stop_the_engine() {
    let dir = TempDir::new().unwrap();
    let mut config = test_config(&dir);
    // Parent of the data path is a file, so every save fails
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    config.data_path = blocker.join("enginedata.dat");

    let data_path = config.data_path.clone();
    let state = EngineState::new(config, AchievementStore::load(&data_path));

    let mut data = state.lock_data();
    data.counters.boot_count = 100;
    run_progress_check(&mut data);

    // Save failed but the in-memory unlock and notification still happened
    assert!(data.store.get("boot_master").unwrap().unlocked);
    assert_eq!(data.queue.len(), 1);
}
