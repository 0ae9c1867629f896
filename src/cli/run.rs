//! Run command implementation
//!
//! Starts the four engine workers, then supervises them from a control loop
//! that polls the config watcher and listens for the shutdown signal.
//! Shutdown joins every worker before the final persistence flush.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use sweetexp::config::Config;
use sweetexp::engine::{EngineController, EngineState};
use sweetexp::notify::NotifyTransport;
use sweetexp::store::AchievementStore;
use sweetexp::watcher::{FileWatcher, WatchEvent};

/// Control loop cadence between config/signal checks.
const CONTROL_TICK: Duration = Duration::from_millis(100);

pub async fn run_command(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    if !config.enabled {
        info!("Engine disabled via config, nothing to do");
        return Ok(());
    }
    config.ensure_dirs()?;

    let store = AchievementStore::load(&config.data_path);
    info!("Engine initialized with {} achievements", store.len());

    let transport = NotifyTransport::new(&config.socket_path);
    let state = Arc::new(EngineState::new(config, store));

    let mut controller = EngineController::new(state.clone());
    controller.start(transport);

    // Config watch is best-effort: without it the engine still runs, it
    // just won't pick up an enabled=false edit until restart
    let config_watcher = match FileWatcher::new(config_path, 500) {
        Ok(watcher) => Some(watcher),
        Err(e) => {
            warn!("Config watch unavailable: {e:#}");
            None
        }
    };

    while state.is_enabled() {
        if let Some(watcher) = &config_watcher {
            while let Some(event) = watcher.try_recv() {
                match event {
                    WatchEvent::Changed(_) => match Config::load(config_path) {
                        Ok(updated) => {
                            if !updated.enabled {
                                info!("Engine disabled via config change");
                            }
                            state.set_enabled(updated.enabled);
                        }
                        // Keep the previous config on a bad edit
                        Err(e) => warn!("Ignoring unreadable config update: {e:#}"),
                    },
                    WatchEvent::Error(e) => warn!("Config watch error: {e}"),
                }
            }
        }

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received");
                state.disable();
            }
            _ = tokio::time::sleep(CONTROL_TICK) => {}
        }
    }

    controller.shutdown();
    Ok(())
}
