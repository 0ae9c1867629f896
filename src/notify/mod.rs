//! Notification queueing and delivery

mod queue;
mod transport;

pub use queue::NotificationQueue;
pub use transport::{NotifyTransport, TransportError};
