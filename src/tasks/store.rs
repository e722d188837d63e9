//! Task store trait and in-memory implementation.

use crate::error::{Error, Result};
use crate::tasks::id::IdGenerator;
use crate::tasks::models::{Status, Task, TaskDraft, TaskId, TaskStats};
use crate::tasks::validation::validate_draft;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Trait for task storage operations.
///
/// Every mutation either applies in full or not at all.
#[allow(clippy::missing_errors_doc)]
pub trait TaskStore {
    /// Validate a draft and append a new pending task built from it.
    fn create_task(&mut self, draft: TaskDraft) -> Result<Task>;

    /// Get a task by ID.
    fn get_task(&self, id: TaskId) -> Option<&Task>;

    /// Replace a task's editable fields.
    ///
    /// The id, creation time and status of the stored task are kept.
    /// Fails with [`Error::TaskNotFound`] if no task has this id.
    fn update_task(&mut self, id: TaskId, draft: TaskDraft) -> Result<Task>;

    /// Delete a task by ID. Returns `false` if there was no such task.
    fn delete_task(&mut self, id: TaskId) -> bool;

    /// Flip a task between pending and completed.
    ///
    /// Returns the updated task, or `None` if there was no such task.
    fn toggle_complete(&mut self, id: TaskId) -> Option<Task>;

    /// Remove every task.
    fn clear(&mut self);

    /// All tasks, in insertion order.
    fn tasks(&self) -> &[Task];

    /// Number of tasks.
    fn len(&self) -> usize {
        self.tasks().len()
    }

    /// Check if the store has no tasks.
    fn is_empty(&self) -> bool {
        self.tasks().is_empty()
    }

    /// Number of pending tasks.
    fn pending_count(&self) -> usize {
        self.tasks().iter().filter(|task| task.is_pending()).count()
    }

    /// Summary counts over all tasks.
    fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(self.tasks())
    }
}

/// Task store held in process memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    tasks: Vec<Task>,
    ids: IdGenerator,
}

impl InMemoryTaskStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a task as if it were submitted at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the draft is incomplete.
    pub fn create_task_at(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> Result<Task> {
        let valid = validate_draft(&draft)?;

        let task = Task {
            id: self.ids.next_id(now),
            title: valid.title,
            description: valid.description,
            priority: valid.priority,
            due_date: valid.due_date,
            status: Status::Pending,
            created_at: now,
        };
        self.tasks.push(task.clone());
        debug!(task_id = %task.id, "task created");
        Ok(task)
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

impl TaskStore for InMemoryTaskStore {
    fn create_task(&mut self, draft: TaskDraft) -> Result<Task> {
        self.create_task_at(draft, Utc::now())
    }

    fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn update_task(&mut self, id: TaskId, draft: TaskDraft) -> Result<Task> {
        let valid = validate_draft(&draft)?;
        let index = self.position(id).ok_or(Error::TaskNotFound(id))?;

        let task = &mut self.tasks[index];
        task.title = valid.title;
        task.description = valid.description;
        task.priority = valid.priority;
        task.due_date = valid.due_date;
        debug!(task_id = %id, "task updated");
        Ok(task.clone())
    }

    fn delete_task(&mut self, id: TaskId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.tasks.remove(index);
        debug!(task_id = %id, "task deleted");
        true
    }

    fn toggle_complete(&mut self, id: TaskId) -> Option<Task> {
        let index = self.position(id)?;
        let task = &mut self.tasks[index];
        task.status = task.status.toggled();
        debug!(task_id = %id, status = %task.status, "task status toggled");
        Some(task.clone())
    }

    fn clear(&mut self) {
        self.tasks.clear();
    }

    fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}
