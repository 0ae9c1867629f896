//! Init command implementation

use anyhow::{bail, Context, Result};
use std::path::Path;

/// Default configuration content for sweetexpd init
pub const DEFAULT_CONFIG: &str = r#"# SweetExperiences Engine Configuration
# =====================================
#
# The engine runs no workers at all, and persists nothing, while
# `enabled` is false. Edits to this file are picked up while the
# engine is running; setting enabled = false stops it.

enabled = true

# Persisted achievement state (created on first save).
# Defaults to ~/.sweetexp/data/sweetexp_enginedata.dat
#data_path = "/home/you/.sweetexp/data/sweetexp_enginedata.dat"

# Unix socket of the external notification consumer. Delivery is
# best-effort: the engine keeps running when nothing is listening.
socket_path = "/tmp/notifengine.sock"

# System counter file watched by the OS activity tap.
system_counter_path = "/proc/stat"

# Chance (percent per dispatch tick) of an ambient notification.
ambient_chance_pct = 5

[intervals]
# Achievement progress check period (milliseconds)
check_ms = 5000
# Notification dispatch period
dispatch_ms = 2000
# Simulated activity tap period
activity_ms = 5000
"#;

/// Write a default config file at `path`.
pub fn init_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }

    std::fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Created {}", path.display());
    Ok(())
}
