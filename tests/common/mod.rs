//! Shared test utilities for engine integration tests

use tempfile::TempDir;

use sweetexp::config::Config;

/// Build an enabled config whose paths all live inside the temp dir and
/// whose workers tick fast enough for tests.
pub fn test_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.enabled = true;
    config.data_path = dir.path().join("enginedata.dat");
    config.socket_path = dir.path().join("notifengine.sock");
    config.system_counter_path = dir.path().join("counter");
    config.ambient_chance_pct = 0;
    config.intervals.check_ms = 10;
    config.intervals.dispatch_ms = 10;
    config.intervals.activity_ms = 10;
    config
}
