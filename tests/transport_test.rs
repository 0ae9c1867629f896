//! Integration tests for NotifyTransport against a real Unix socket.

use std::io::Read;
use std::os::unix::net::UnixListener;
use std::thread;

use tempfile::TempDir;

use sweetexp::notify::{NotifyTransport, TransportError};
use sweetexp::{Notification, NotificationKind};

#[test]
fn delivers_one_json_message_per_connection() {
    let dir = TempDir::new().unwrap();
    let socket_path = dir.path().join("notifengine.sock");
    let listener = UnixListener::bind(&socket_path).unwrap();

    let reader = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut received = String::new();
        stream.read_to_string(&mut received).unwrap();
        received
    });

    let transport = NotifyTransport::new(&socket_path);
    let notification = Notification::new(NotificationKind::Achievement, "Test unlock", 5);
    transport.send(&notification).unwrap();

    let received = reader.join().unwrap();
    assert!(received.ends_with('\n'));

    let value: serde_json::Value = serde_json::from_str(received.trim_end()).unwrap();
    assert_eq!(value["type"], "achievement");
    assert_eq!(value["message"], "Test unlock");
    assert_eq!(value["priority"], 5);
    assert_eq!(value["timestamp"], notification.timestamp);
}

#[test]
fn absent_consumer_is_a_connect_error() {
    let dir = TempDir::new().unwrap();
    let transport = NotifyTransport::new(dir.path().join("nobody-home.sock"));
    let notification = Notification::new(NotificationKind::Random, "hello?", 2);

    match transport.send(&notification) {
        Err(TransportError::Connect { path, .. }) => {
            assert!(path.ends_with("nobody-home.sock"));
        }
        other => panic!("expected a connect error, got {other:?}"),
    }
}

#[test]
fn each_send_opens_a_fresh_connection() {
    let dir = TempDir::new().unwrap();
    let socket_path = dir.path().join("notifengine.sock");
    let listener = UnixListener::bind(&socket_path).unwrap();

    let reader = thread::spawn(move || {
        let mut messages = Vec::new();
        for _ in 0..2 {
            let (mut stream, _) = listener.accept().unwrap();
            let mut received = String::new();
            stream.read_to_string(&mut received).unwrap();
            messages.push(received);
        }
        messages
    });

    let transport = NotifyTransport::new(&socket_path);
    transport
        .send(&Notification::new(NotificationKind::System, "first", 1))
        .unwrap();
    transport
        .send(&Notification::new(NotificationKind::System, "second", 1))
        .unwrap();

    let messages = reader.join().unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].contains("first"));
    assert!(messages[1].contains("second"));
}
