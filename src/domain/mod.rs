//! Core domain types for the engine

mod achievement;
mod notification;

pub use achievement::{
    Achievement, MAX_ACHIEVEMENTS, MAX_DESCRIPTION_LEN, MAX_ID_LEN, MAX_NAME_LEN,
};
pub use notification::{Notification, NotificationKind, MAX_MESSAGE_LEN, MAX_NOTIFICATIONS};

/// Truncate a string to at most `max` bytes without splitting a UTF-8
/// character. Used to enforce the fixed field caps of the on-disk format.
pub(crate) fn truncate_utf8(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    s[..cut].to_string()
}
