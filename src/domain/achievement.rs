//! Achievement catalog entries

/// Maximum number of achievements the catalog will hold.
pub const MAX_ACHIEVEMENTS: usize = 50;

/// Field byte caps carried over from the fixed-size on-disk records.
pub const MAX_ID_LEN: usize = 31;
pub const MAX_NAME_LEN: usize = 63;
pub const MAX_DESCRIPTION_LEN: usize = 127;

/// A named progress goal with a target threshold and a one-way unlock state.
///
/// Once `unlocked` flips to true it never reverts, and `unlock_time` is
/// stamped exactly once at that moment (zero while locked).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    /// Short stable identifier, unique within the catalog
    pub id: String,
    /// Display name
    pub name: String,
    /// Display description
    pub description: String,
    /// Achievement-specific progress counter (may be externally driven)
    pub progress: u32,
    /// Unlock threshold, fixed at definition time
    pub target: u32,
    /// One-way unlock flag
    pub unlocked: bool,
    /// Epoch seconds of the unlock, zero while locked
    pub unlock_time: i64,
}

impl Achievement {
    /// Create a locked achievement with zero progress.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        target: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            progress: 0,
            target,
            unlocked: false,
            unlock_time: 0,
        }
    }
}
