//! Task management.
//!
//! This module provides the task store:
//! - Tasks with title, description, priority, due date and status
//! - Validation with per-field error messages
//! - Time-based task ids that are never reused
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use taskdeck::tasks::{InMemoryTaskStore, Priority, TaskDraft, TaskStore};
//!
//! let mut store = InMemoryTaskStore::new();
//! let due = NaiveDate::from_ymd_opt(2024, 5, 1);
//! let task = store
//!     .create_task(TaskDraft::new("Fix login bug", "OAuth users cannot log in", Priority::High, due))
//!     .unwrap();
//!
//! store.toggle_complete(task.id);
//! assert_eq!(store.pending_count(), 0);
//! ```

pub mod id;
pub mod models;
pub mod store;
pub mod validation;

pub use models::{
    InvalidPriority, InvalidStatus, Priority, Status, Task, TaskDraft, TaskId, TaskStats,
};
pub use store::{InMemoryTaskStore, TaskStore};
pub use validation::{parse_due_date, validate_draft, Field, ValidDraft, ValidationErrors};
