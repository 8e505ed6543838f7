//! Transient user notifications ("toasts").
//!
//! Mutations push short messages here for the UI to display. Nothing in the
//! store reads them back; the UI drains the queue.

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::config::NotificationConfig;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Info => write!(f, "info"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    /// How long the UI should show it.
    #[serde(with = "duration_ms")]
    pub duration: Duration,
}

/// Bounded FIFO of pending notifications. The oldest is dropped on overflow.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
    capacity: usize,
    duration: Duration,
}

impl NotificationQueue {
    pub fn new(config: &NotificationConfig) -> Self {
        Self {
            pending: VecDeque::with_capacity(config.capacity),
            capacity: config.capacity,
            duration: config.duration(),
        }
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Severity::Success, message.into());
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Severity::Info, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Severity::Error, message.into());
    }

    fn push(&mut self, severity: Severity, message: String) {
        if self.capacity == 0 {
            return;
        }
        while self.pending.len() >= self.capacity {
            self.pending.pop_front();
        }
        self.pending.push_back(Notification {
            severity,
            message,
            duration: self.duration,
        });
    }

    /// Take every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    /// Look at pending notifications without taking them.
    pub fn pending(&self) -> impl Iterator<Item = &Notification> {
        self.pending.iter()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

mod duration_ms {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}
