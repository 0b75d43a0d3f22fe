//! Single-slot transient notifications.
//!
//! A new notification replaces whatever is showing. Each one expires a fixed
//! time after it was raised.

use std::time::{Duration, Instant};

/// Severity or category for user-visible notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub severity: Severity,
    pub message: String,
    pub raised_at: Instant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationSlot {
    current: Option<Notification>,
    ttl: Duration,
    next_id: u64,
}

impl NotificationSlot {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            ttl,
            next_id: 1,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Replaces the current notification. Returns the new slot and the id of
    /// the notification just raised.
    pub fn show(self, severity: Severity, message: impl Into<String>, now: Instant) -> (Self, u64) {
        let id = self.next_id;
        let notification = Notification {
            id,
            severity,
            message: message.into(),
            raised_at: now,
        };
        (
            Self {
                current: Some(notification),
                ttl: self.ttl,
                next_id: id + 1,
            },
            id,
        )
    }

    /// The slot contents, whether or not they have expired.
    #[cfg(test)]
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// The live notification, if any.
    pub fn visible(&self, now: Instant) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|n| now.saturating_duration_since(n.raised_at) < self.ttl)
    }

    pub fn evict_expired(self, now: Instant) -> Self {
        let current = match self.current {
            Some(n) if now.saturating_duration_since(n.raised_at) < self.ttl => Some(n),
            _ => None,
        };
        Self { current, ..self }
    }

    /// Clears the slot only if `id` is still the one showing.
    pub fn dismiss(self, id: u64) -> Self {
        let current = self.current.filter(|n| n.id != id);
        Self { current, ..self }
    }
}
