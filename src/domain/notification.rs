//! Notification types destined for the external consumer

use serde::Serialize;

/// Capacity of the in-memory notification queue.
pub const MAX_NOTIFICATIONS: usize = 100;

/// Maximum notification text length in bytes.
pub const MAX_MESSAGE_LEN: usize = 255;

/// Closed set of notification categories understood by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Achievement unlock announcement
    Achievement,
    /// Ambient engagement message with no triggering event
    Random,
    /// System activity summary
    System,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Achievement => "achievement",
            Self::Random => "random",
            Self::System => "system",
        }
    }
}

/// An ephemeral, typed, prioritized message for external display.
///
/// Notifications are created by a producer, queued (or sent directly),
/// delivered at most once, and discarded. They are never re-queued.
/// The serialized form is the wire format sent to the consumer:
/// `{"type":...,"message":...,"priority":...,"timestamp":...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub message: String,
    /// Higher is more important; payload content only, never used for
    /// queue reordering (the queue is strict FIFO)
    pub priority: i32,
    /// Creation time, epoch seconds
    pub timestamp: i64,
}

impl Notification {
    /// Create a notification stamped with the current time. The message is
    /// capped at [`MAX_MESSAGE_LEN`] bytes.
    pub fn new(kind: NotificationKind, message: impl Into<String>, priority: i32) -> Self {
        Self {
            kind,
            message: super::truncate_utf8(&message.into(), MAX_MESSAGE_LEN),
            priority,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_matches_consumer_contract() {
        let notif = Notification {
            kind: NotificationKind::Achievement,
            message: "hello".to_string(),
            priority: 5,
            timestamp: 1700000000,
        };
        let json = serde_json::to_string(&notif).unwrap();
        assert_eq!(
            json,
            r#"{"type":"achievement","message":"hello","priority":5,"timestamp":1700000000}"#
        );
    }

    #[test]
    fn kind_serializes_lowercase() {
        for (kind, expected) in [
            (NotificationKind::Achievement, "\"achievement\""),
            (NotificationKind::Random, "\"random\""),
            (NotificationKind::System, "\"system\""),
        ] {
            assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
            assert_eq!(format!("\"{}\"", kind.as_str()), expected);
        }
    }

    #[test]
    fn oversized_message_is_capped() {
        let long = "x".repeat(MAX_MESSAGE_LEN + 40);
        let notif = Notification::new(NotificationKind::System, long, 1);
        assert_eq!(notif.message.len(), MAX_MESSAGE_LEN);
    }
}
