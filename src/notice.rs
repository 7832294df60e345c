//! Transient user-visible notices.

use std::time::{Duration, Instant};

use derive_getters::Getters;
use tracing::{debug, instrument};

/// Default display interval for a notice.
pub const NOTICE_LIFETIME: Duration = Duration::from_secs(3);

/// Tone of a notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Neutral information.
    Info,
    /// Round finished.
    Success,
    /// Something went wrong.
    Error,
}

/// A message shown until it expires or is dismissed.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct Notice {
    id: u64,
    level: NoticeLevel,
    message: String,
    expires_at: Instant,
}

/// Queue of live notices, oldest first.
#[derive(Debug, Clone)]
pub struct Notices {
    items: Vec<Notice>,
    lifetime: Duration,
    next_id: u64,
}

impl Notices {
    /// Creates an empty queue whose notices live for `lifetime`.
    pub fn new(lifetime: Duration) -> Self {
        Self {
            items: Vec::new(),
            lifetime,
            next_id: 0,
        }
    }

    /// Adds a notice and returns its id.
    #[instrument(skip(self, message), fields(message = %message.as_ref()))]
    pub fn push(&mut self, level: NoticeLevel, message: impl AsRef<str>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Notice {
            id,
            level,
            message: message.as_ref().to_string(),
            expires_at: now + self.lifetime,
        });
        debug!(id, ?level, "Notice raised");
        id
    }

    /// Drops every notice whose time is up.
    pub fn expire(&mut self, now: Instant) {
        self.items.retain(|n| n.expires_at > now);
    }

    /// Dismisses one notice. Returns whether it was still live.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        before != self.items.len()
    }

    /// Dismisses the newest notice.
    pub fn dismiss_latest(&mut self) -> bool {
        self.items.pop().is_some()
    }

    /// Dismisses everything.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Live notices, oldest first.
    pub fn items(&self) -> &[Notice] {
        &self.items
    }

    /// Whether nothing is showing.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for Notices {
    fn default() -> Self {
        Self::new(NOTICE_LIFETIME)
    }
}
