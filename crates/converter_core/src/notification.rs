//! Auto-expiring user notifications.
//!
//! Visibility is computed from each entry's creation time on every read, so
//! an entry is never shown past its lifetime even if nobody pruned it yet.

use std::time::{Duration, Instant};

/// How long a notification stays visible after it is pushed.
pub const NOTIFICATION_LIFETIME: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub text: String,
    pub created_at: Instant,
}

impl Notification {
    pub fn is_active_at(&self, now: Instant, lifetime: Duration) -> bool {
        now.saturating_duration_since(self.created_at) < lifetime
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    next_id: u64,
    lifetime: Duration,
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::with_lifetime(NOTIFICATION_LIFETIME)
    }
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            lifetime,
        }
    }

    pub fn push(
        &mut self,
        kind: NotificationKind,
        text: impl Into<String>,
        now: Instant,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            kind,
            text: text.into(),
            created_at: now,
        });
        id
    }

    /// Notifications still within their lifetime, oldest first.
    pub fn active(&self, now: Instant) -> impl Iterator<Item = &Notification> + '_ {
        let lifetime = self.lifetime;
        self.entries
            .iter()
            .filter(move |entry| entry.is_active_at(now, lifetime))
    }

    /// Drops expired entries and returns how many were removed.
    pub fn prune(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let lifetime = self.lifetime;
        self.entries.retain(|entry| entry.is_active_at(now, lifetime));
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let now = Instant::now();
        let mut queue = NotificationQueue::new();
        let a = queue.push(NotificationKind::Success, "a", now);
        let b = queue.push(NotificationKind::Success, "a", now);
        assert!(a < b);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn prune_keeps_unexpired_entries() {
        let start = Instant::now();
        let mut queue = NotificationQueue::with_lifetime(Duration::from_secs(1));
        queue.push(NotificationKind::Error, "old", start);
        queue.push(
            NotificationKind::Error,
            "new",
            start + Duration::from_millis(800),
        );

        let removed = queue.prune(start + Duration::from_millis(1200));
        assert_eq!(removed, 1);
        let texts: Vec<_> = queue
            .active(start + Duration::from_millis(1200))
            .map(|n| n.text.as_str())
            .collect();
        assert_eq!(texts, vec!["new"]);
    }
}
