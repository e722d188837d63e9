//! Task ID generation.
//!
//! Ids are the creation time in milliseconds since the Unix epoch. Two tasks
//! created within the same millisecond (or after the clock steps backwards)
//! get the previous id plus one, so ids stay unique and strictly increasing.

use super::models::TaskId;
use chrono::{DateTime, Utc};

/// Hands out time-based task ids for a single store.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    /// Create a generator that has not issued any id yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Issue the id for a task created at `now`.
    pub fn next_id(&mut self, now: DateTime<Utc>) -> TaskId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let value = match self.last {
            Some(last) if millis <= last => last + 1,
            _ => millis,
        };
        self.last = Some(value);
        TaskId::new(value)
    }
}
