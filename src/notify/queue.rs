//! Bounded FIFO queue decoupling notification producers from the dispatcher

use crate::domain::{Notification, MAX_NOTIFICATIONS};

/// Fixed-capacity circular buffer of notifications.
///
/// Strict FIFO with drop-newest backpressure: enqueueing into a full queue
/// discards the new notification and preserves the oldest ones. That is a
/// behavioral contract, not an implementation artifact — notifications are
/// ephemeral UX, and under pressure the ones already queued win.
///
/// Invariant: `len == (tail - head) mod capacity`, with `head == tail` and
/// `len == 0` meaning empty.
#[derive(Debug)]
pub struct NotificationQueue {
    slots: Vec<Option<Notification>>,
    head: usize,
    tail: usize,
    count: usize,
}

impl NotificationQueue {
    /// Create a queue with the standard capacity ([`MAX_NOTIFICATIONS`]).
    pub fn new() -> Self {
        Self::with_capacity(MAX_NOTIFICATIONS)
    }

    /// Create a queue with an explicit capacity (must be non-zero).
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be non-zero");
        Self {
            slots: vec![None; capacity],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn is_full(&self) -> bool {
        self.count == self.slots.len()
    }

    /// Whether at least one more notification fits.
    pub fn has_capacity(&self) -> bool {
        self.count < self.slots.len()
    }

    /// Enqueue a notification. Returns false (dropping the notification)
    /// when the queue is full.
    pub fn push(&mut self, notification: Notification) -> bool {
        if self.is_full() {
            return false;
        }
        self.slots[self.tail] = Some(notification);
        self.tail = (self.tail + 1) % self.slots.len();
        self.count += 1;
        true
    }

    /// Dequeue the oldest notification, if any.
    pub fn pop(&mut self) -> Option<Notification> {
        if self.count == 0 {
            return None;
        }
        let notification = self.slots[self.head].take();
        self.head = (self.head + 1) % self.slots.len();
        self.count -= 1;
        notification
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NotificationKind;

    fn notif(n: usize) -> Notification {
        Notification::new(NotificationKind::System, format!("message {n}"), 1)
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let mut queue = NotificationQueue::with_capacity(4);
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }

    #[test]
    fn dequeue_order_is_fifo() {
        let mut queue = NotificationQueue::with_capacity(8);
        for i in 0..5 {
            assert!(queue.push(notif(i)));
        }
        for i in 0..5 {
            assert_eq!(queue.pop().unwrap().message, format!("message {i}"));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn full_queue_drops_the_newest() {
        let mut queue = NotificationQueue::with_capacity(3);
        for i in 0..3 {
            assert!(queue.push(notif(i)));
        }
        assert!(queue.is_full());
        assert!(!queue.has_capacity());

        // The overflowing push is a no-op; the three oldest survive
        assert!(!queue.push(notif(99)));
        assert_eq!(queue.len(), 3);
        for i in 0..3 {
            assert_eq!(queue.pop().unwrap().message, format!("message {i}"));
        }
    }

    #[test]
    fn count_never_exceeds_capacity_at_standard_size() {
        let mut queue = NotificationQueue::new();
        assert_eq!(queue.capacity(), MAX_NOTIFICATIONS);
        for i in 0..(MAX_NOTIFICATIONS + 20) {
            queue.push(notif(i));
        }
        assert_eq!(queue.len(), MAX_NOTIFICATIONS);
        assert_eq!(queue.pop().unwrap().message, "message 0");
    }

    #[test]
    fn wraparound_preserves_order_and_count() {
        let mut queue = NotificationQueue::with_capacity(3);
        // Drive head/tail several times around the ring
        for round in 0..10 {
            assert!(queue.push(notif(round)));
            assert!(queue.push(notif(round + 100)));
            assert_eq!(queue.len(), 2);
            assert_eq!(queue.pop().unwrap().message, format!("message {round}"));
            assert_eq!(
                queue.pop().unwrap().message,
                format!("message {}", round + 100)
            );
            assert!(queue.is_empty());
        }
    }
}
