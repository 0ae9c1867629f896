//! Durable achievement catalog storage
//!
//! The on-disk format is line-oriented text: a header line followed by one
//! pipe-delimited record per achievement:
//!
//! ```text
//! SWEETENGINE_DATA_v1
//! ACH:<id>|<name>|<description>|<progress>|<target>|<0|1>|<unlockTimeEpochSecs>
//! ```
//!
//! Loading is robustness-over-strictness: malformed records are skipped so
//! a corrupt trailing line never prevents loading the valid prefix, and a
//! missing/empty/unreadable file seeds the built-in default catalog. The
//! engine always starts with a non-empty catalog.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::debug;

use crate::domain::{
    truncate_utf8, Achievement, MAX_ACHIEVEMENTS, MAX_DESCRIPTION_LEN, MAX_ID_LEN, MAX_NAME_LEN,
};

/// First line of every data file.
pub const DATA_HEADER: &str = "SWEETENGINE_DATA_v1";

const RECORD_PREFIX: &str = "ACH:";

/// The achievement catalog plus its persistence path.
///
/// All mutation happens through [`unlock`](Self::unlock); callers are
/// responsible for holding the engine data lock around `save` so the
/// serialized catalog is a consistent snapshot.
#[derive(Debug)]
pub struct AchievementStore {
    path: PathBuf,
    entries: Vec<Achievement>,
}

impl AchievementStore {
    /// Load the catalog from `path`, seeding the default achievements when
    /// no valid record can be read. Never fails.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut entries: Vec<Achievement> = Vec::new();

        match fs::read_to_string(&path) {
            Ok(content) => {
                let mut lines = content.lines();
                if lines.next() != Some(DATA_HEADER) {
                    // Tolerated: records are self-describing via their prefix
                    debug!("Data file {} has no recognized header", path.display());
                    lines = content.lines();
                }
                for line in lines {
                    if entries.len() >= MAX_ACHIEVEMENTS {
                        debug!("Catalog cap reached, ignoring remaining records");
                        break;
                    }
                    let Some(record) = line.strip_prefix(RECORD_PREFIX) else {
                        continue;
                    };
                    match parse_record(record) {
                        Some(ach) if entries.iter().any(|e| e.id == ach.id) => {
                            debug!(id = %ach.id, "Skipping duplicate achievement record");
                        }
                        Some(ach) => entries.push(ach),
                        None => debug!(line, "Skipping malformed achievement record"),
                    }
                }
            }
            Err(e) => {
                debug!("No achievement data at {}: {}", path.display(), e);
            }
        }

        if entries.is_empty() {
            debug!("Seeding default achievement catalog");
            entries = default_catalog();
        }

        Self { path, entries }
    }

    /// Serialize the full catalog back to the data file as a whole-buffer
    /// write (temp file + atomic rename). Call under the engine data lock.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create data directory: {}", parent.display())
            })?;
        }

        let mut buffer = String::with_capacity(64 + self.entries.len() * 128);
        buffer.push_str(DATA_HEADER);
        buffer.push('\n');
        for entry in &self.entries {
            buffer.push_str(&format_record(entry));
            buffer.push('\n');
        }

        let temp_path = self.path.with_extension("dat.tmp");
        fs::write(&temp_path, buffer)
            .with_context(|| format!("Failed to write temp file: {}", temp_path.display()))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to rename data file: {}", self.path.display()))?;

        Ok(())
    }

    /// Unlock an achievement by id, stamping the unlock time.
    ///
    /// Idempotent: returns true only on the false->true transition. An
    /// unknown id is a no-op returning false, not an error.
    pub fn unlock(&mut self, id: &str) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        if entry.unlocked {
            return false;
        }
        entry.unlocked = true;
        entry.unlock_time = Utc::now().timestamp();
        true
    }

    /// Look up an achievement by id.
    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Full catalog, in load order.
    pub fn entries(&self) -> &[Achievement] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Persistence path this store reads from and writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The two built-in achievements seeded when no persisted state exists.
fn default_catalog() -> Vec<Achievement> {
    vec![
        Achievement::new("boot_master", "Boot Master", "Boot 10 times successfully", 10),
        Achievement::new("wayland_pro", "Wayland Pro", "Process 500 Wayland events", 500),
    ]
}

fn parse_record(record: &str) -> Option<Achievement> {
    let mut fields = record.splitn(7, '|');
    let id = fields.next()?;
    let name = fields.next()?;
    let description = fields.next()?;
    let progress: u32 = fields.next()?.trim().parse().ok()?;
    let target: u32 = fields.next()?.trim().parse().ok()?;
    let unlocked = match fields.next()?.trim() {
        "0" => false,
        "1" => true,
        _ => return None,
    };
    let unlock_time: i64 = fields.next()?.trim().parse().ok()?;

    if id.is_empty() {
        return None;
    }

    Some(Achievement {
        id: truncate_utf8(id, MAX_ID_LEN),
        name: truncate_utf8(name, MAX_NAME_LEN),
        description: truncate_utf8(description, MAX_DESCRIPTION_LEN),
        progress,
        target,
        unlocked,
        unlock_time,
    })
}

fn format_record(entry: &Achievement) -> String {
    format!(
        "{RECORD_PREFIX}{}|{}|{}|{}|{}|{}|{}",
        sanitize(&entry.id),
        sanitize(&entry.name),
        sanitize(&entry.description),
        entry.progress,
        entry.target,
        u8::from(entry.unlocked),
        entry.unlock_time
    )
}

/// The record format reserves '|' and newlines; display text never needs
/// them, so they are flattened rather than escaped.
fn sanitize(field: &str) -> String {
    field.replace(['|', '\n', '\r'], " ")
}
