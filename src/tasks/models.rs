//! Task model types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a task.
///
/// Ids are derived from the creation time in milliseconds and are strictly
/// increasing within a store, so they are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    /// Wrap a raw id value.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for TaskId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Task priority levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    /// Nice to have.
    Low,
    /// Normal work (default).
    #[default]
    Medium,
    /// Should be done soon.
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    /// Parse a priority from a string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid priority.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidPriority> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(InvalidPriority(s.to_string())),
        }
    }

    /// Get the string representation of the priority.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when an invalid priority string is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPriority(pub String);

impl fmt::Display for InvalidPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid priority: '{}' (must be one of: Low, Medium, High)", self.0)
    }
}

impl std::error::Error for InvalidPriority {}

/// Task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    /// Task still needs doing.
    #[default]
    Pending,
    /// Task is done.
    Completed,
}

impl Status {
    /// Parse a status from a string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid status.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidStatus> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            _ => Err(InvalidStatus(s.to_string())),
        }
    }

    /// Get the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
        }
    }

    /// The other status.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Completed,
            Self::Completed => Self::Pending,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when an invalid status string is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidStatus(pub String);

impl fmt::Display for InvalidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid status: '{}' (must be one of: Pending, Completed)", self.0)
    }
}

impl std::error::Error for InvalidStatus {}

/// A task in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier, assigned at creation.
    pub id: TaskId,
    /// Short title (non-empty, trimmed).
    pub title: String,
    /// Detailed description (non-empty, trimmed).
    pub description: String,
    /// Priority level.
    pub priority: Priority,
    /// Date the task is due.
    pub due_date: NaiveDate,
    /// Current status.
    pub status: Status,
    /// When the task was created. Never changes.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Check if the task is still pending.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == Status::Pending
    }

    /// Check if the task is completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.status == Status::Completed
    }
}

/// The editable fields of a task, as submitted by a caller.
///
/// Text fields are validated and trimmed by the store, so a draft may hold
/// raw user input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    /// Title as entered.
    pub title: String,
    /// Description as entered.
    pub description: String,
    /// Priority (defaults to Medium).
    #[serde(default)]
    pub priority: Priority,
    /// Due date, if one was entered.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    /// Create a draft from its parts.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        due_date: Option<NaiveDate>,
    ) -> Self {
        Self { title: title.into(), description: description.into(), priority, due_date }
    }
}

impl From<&Task> for TaskDraft {
    /// Pre-fill a draft for editing an existing task.
    fn from(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            priority: task.priority,
            due_date: Some(task.due_date),
        }
    }
}

/// Counts shown alongside the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Number of tasks in the store.
    pub total: usize,
    /// Number of completed tasks.
    pub completed: usize,
    /// Number of pending tasks.
    pub pending: usize,
    /// Number of pending tasks with high priority.
    pub high_priority_pending: usize,
}

impl TaskStats {
    /// Compute stats over a task collection.
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        tasks.iter().fold(Self::default(), |mut stats, task| {
            stats.total += 1;
            match task.status {
                Status::Completed => stats.completed += 1,
                Status::Pending => {
                    stats.pending += 1;
                    if task.priority == Priority::High {
                        stats.high_priority_pending += 1;
                    }
                }
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task {
            id: TaskId::new(1_700_000_000_000),
            title: "Buy milk".to_string(),
            description: "Semi-skimmed".to_string(),
            priority: Priority::Medium,
            due_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            status: Status::Pending,
            created_at: "2024-01-01T00:00:00Z".parse().unwrap(),
        }
    }

    #[test]
    fn test_priority_from_str() {
        assert_eq!(Priority::from_str("low").unwrap(), Priority::Low);
        assert_eq!(Priority::from_str("MEDIUM").unwrap(), Priority::Medium);
        assert_eq!(Priority::from_str(" High ").unwrap(), Priority::High);
        assert!(Priority::from_str("critical").is_err());
    }

    #[test]
    fn test_priority_default() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_invalid_priority_display() {
        let err = InvalidPriority("urgent".to_string());
        assert!(err.to_string().contains("urgent"));
        assert!(err.to_string().contains("Medium"));
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!(Status::from_str("pending").unwrap(), Status::Pending);
        assert_eq!(Status::from_str("Completed").unwrap(), Status::Completed);
        assert!(Status::from_str("done").is_err());
    }

    #[test]
    fn test_status_toggled() {
        assert_eq!(Status::Pending.toggled(), Status::Completed);
        assert_eq!(Status::Completed.toggled(), Status::Pending);
        assert_eq!(Status::Pending.toggled().toggled(), Status::Pending);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Pending.to_string(), "Pending");
        assert_eq!(Status::Completed.to_string(), "Completed");
    }

    #[test]
    fn test_task_id_parse() {
        assert_eq!("17".parse::<TaskId>().unwrap(), TaskId::new(17));
        assert!("abc".parse::<TaskId>().is_err());
    }

    #[test]
    fn test_task_serialization_uses_camel_case() {
        let task = sample_task();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "2024-01-31");
        assert_eq!(json["status"], "Pending");
        assert_eq!(json["id"], 1_700_000_000_000_u64);

        let parsed: Task = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, task);
    }

    #[test]
    fn test_draft_from_task() {
        let task = sample_task();
        let draft = TaskDraft::from(&task);
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.due_date, Some(task.due_date));
    }

    #[test]
    fn test_stats_from_tasks() {
        let mut high = sample_task();
        high.priority = Priority::High;
        let mut done_high = high.clone();
        done_high.status = Status::Completed;

        let stats = TaskStats::from_tasks(&[sample_task(), high, done_high]);
        assert_eq!(
            stats,
            TaskStats { total: 3, completed: 1, pending: 2, high_priority_pending: 1 }
        );
    }
}
