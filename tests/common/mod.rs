//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use std::time::{Duration, Instant};

use gitops_console::backend::{ApiBridge, BackendMessage};

/// Upper bound on how long a test waits for the backend worker
pub fn test_timeout() -> Duration {
    Duration::from_secs(2)
}

/// Poll the bridge until `count` messages arrived or the timeout expires.
pub fn collect_messages(bridge: &ApiBridge, count: usize) -> Vec<BackendMessage> {
    let deadline = Instant::now() + test_timeout();
    let mut messages = Vec::new();
    while messages.len() < count && Instant::now() < deadline {
        match bridge.msg_rx.recv_timeout(Duration::from_millis(20)) {
            Ok(msg) => messages.push(msg),
            Err(_) => continue,
        }
    }
    messages
}
