//! Status command implementation

use anyhow::Result;
use std::path::Path;

use sweetexp::config::Config;
use sweetexp::store::AchievementStore;

/// Print the persisted achievement catalog.
pub fn status_command(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let store = AchievementStore::load(&config.data_path);

    let unlocked = store.entries().iter().filter(|a| a.unlocked).count();
    println!("Achievements ({unlocked}/{} unlocked):\n", store.len());

    for entry in store.entries() {
        if entry.unlocked {
            let when = chrono::DateTime::from_timestamp(entry.unlock_time, 0)
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            println!("  [x] {} - {} (unlocked {})", entry.name, entry.description, when);
        } else {
            println!(
                "  [ ] {} - {} ({}/{})",
                entry.name, entry.description, entry.progress, entry.target
            );
        }
    }

    Ok(())
}
