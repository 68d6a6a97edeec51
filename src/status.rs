//! Human-readable status side channel.
//!
//! Operations return typed results; the status sink only mirrors them as text
//! for whatever front end is attached.

use std::sync::{Arc, Mutex};

/// Receives human-readable status lines from client operations.
pub trait StatusSink: Send + Sync {
    /// Called with a status line.
    fn status(&self, message: &str);
}

impl<F> StatusSink for F
where
    F: Fn(&str) + Send + Sync,
{
    fn status(&self, message: &str) {
        self(message)
    }
}

/// Sink that discards all messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl StatusSink for NullSink {
    fn status(&self, _message: &str) {}
}

/// Shared "latest message" sink for status bars.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    current: Arc<Mutex<String>>,
}

impl StatusLine {
    /// Creates an empty status line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current message.
    pub fn set(&self, message: impl Into<String>) {
        // A poisoned lock only means a writer panicked mid-assignment.
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = message.into();
    }

    /// Clears the current message.
    pub fn clear(&self) {
        self.set(String::new());
    }

    /// Returns a copy of the current message.
    pub fn get(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl StatusSink for StatusLine {
    fn status(&self, message: &str) {
        self.set(message);
    }
}
