//! Append-only notification log.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One recorded notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationLogEntry {
    /// When the scan ran.
    pub timestamp: DateTime<Utc>,
    /// Rendered notification text.
    pub message: String,
    /// Pending tasks counted by the scan.
    pub pending_count: usize,
}

/// Notifications in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct NotificationLog {
    entries: Vec<NotificationLogEntry>,
}

impl NotificationLog {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&mut self, entry: NotificationLogEntry) {
        self.entries.push(entry);
    }

    /// Every entry, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[NotificationLogEntry] {
        &self.entries
    }

    /// The last `limit` entries, oldest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> &[NotificationLogEntry] {
        let start = self.entries.len().saturating_sub(limit);
        &self.entries[start..]
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(pending_count: usize) -> NotificationLogEntry {
        NotificationLogEntry {
            timestamp: Utc::now(),
            message: format!("{pending_count} pending"),
            pending_count,
        }
    }

    #[test]
    fn test_recent_returns_tail_in_order() {
        let mut log = NotificationLog::new();
        for count in 1..=5 {
            log.push(entry(count));
        }
        let counts: Vec<usize> = log.recent(3).iter().map(|e| e.pending_count).collect();
        assert_eq!(counts, vec![3, 4, 5]);
        assert_eq!(log.len(), 5);
    }

    #[test]
    fn test_recent_with_few_entries() {
        let mut log = NotificationLog::new();
        assert!(log.recent(3).is_empty());
        log.push(entry(1));
        assert_eq!(log.recent(3).len(), 1);
        assert!(log.recent(0).is_empty());
    }

    #[test]
    fn test_clear() {
        let mut log = NotificationLog::new();
        log.push(entry(2));
        log.clear();
        assert!(log.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(entry(4)).unwrap();
        assert_eq!(json["pendingCount"], 4);
        assert_eq!(json["message"], "4 pending");
    }
}
