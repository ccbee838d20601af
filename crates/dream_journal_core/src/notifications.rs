//! crates/dream_journal_core/src/notifications.rs
//!
//! Ephemeral status messages. Every entry is removed exactly once, either by an explicit
//! dismissal or by its expiry, and whichever comes second observes an absent entry.

use chrono::{DateTime, FixedOffset};
use std::time::Duration;

use crate::domain::{Notification, NotificationId, NotificationKind};

pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    ttl: Duration,
    last_id: u64,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}

impl NotificationQueue {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Vec::new(),
            ttl,
            last_id: 0,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Appends a message that expires `ttl` after `now`.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: DateTime<FixedOffset>,
    ) -> Notification {
        let id = self.next_id(now);
        let expires_at = chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(now);
        let notification = Notification {
            id,
            message: message.into(),
            kind,
            timestamp: now,
            expires_at,
        };
        self.entries.push(notification.clone());
        notification
    }

    /// Removes the entry early. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        self.remove(id)
    }

    /// Timer-driven removal. Returns `false` if the entry was dismissed first.
    pub fn expire(&mut self, id: NotificationId) -> bool {
        self.remove(id)
    }

    /// Removes every entry whose deadline is at or before `now`.
    pub fn sweep(&mut self, now: DateTime<FixedOffset>) -> Vec<NotificationId> {
        let mut expired = Vec::new();
        self.entries.retain(|n| {
            if n.expires_at <= now {
                expired.push(n.id);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Insertion order.
    pub fn active(&self) -> &[Notification] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn remove(&mut self, id: NotificationId) -> bool {
        match self.entries.iter().position(|n| n.id == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Epoch milliseconds, bumped past the previous id when two land in the same millisecond.
    fn next_id(&mut self, now: DateTime<FixedOffset>) -> NotificationId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;
        NotificationId(id)
    }
}
