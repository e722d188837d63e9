//! Visible task list derivation.
//!
//! The visible list is recomputed from scratch from the tasks, the debounced
//! search term and the category filter every time it is asked for.

use crate::debounce::Debouncer;
use crate::tasks::{Priority, Status, Task};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Category filter applied on top of the search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Filter {
    /// Every task.
    #[default]
    All,
    /// Only completed tasks.
    Completed,
    /// Only pending tasks.
    Pending,
    /// Only low priority tasks.
    Low,
    /// Only medium priority tasks.
    Medium,
    /// Only high priority tasks.
    High,
}

impl Filter {
    /// All filters, in display order.
    pub const ALL: [Self; 6] =
        [Self::All, Self::Completed, Self::Pending, Self::Low, Self::Medium, Self::High];

    /// Parse a filter from a string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string names no filter.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Result<Self, InvalidFilter> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|filter| filter.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvalidFilter(s.to_string()))
    }

    /// Get the string representation of the filter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    /// Check whether a task belongs to this category.
    #[must_use]
    pub fn accepts(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.status == Status::Completed,
            Self::Pending => task.status == Status::Pending,
            Self::Low => task.priority == Priority::Low,
            Self::Medium => task.priority == Priority::Medium,
            Self::High => task.priority == Priority::High,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when an unknown filter name is provided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidFilter(pub String);

impl fmt::Display for InvalidFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid filter: '{}' (must be one of: All, Completed, Pending, Low, Medium, High)",
            self.0
        )
    }
}

impl std::error::Error for InvalidFilter {}

/// Check whether a task matches a search term.
///
/// An empty term matches everything. Otherwise the term must appear,
/// ignoring case, in the title or the description.
#[must_use]
pub fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    task.title.to_lowercase().contains(&term) || task.description.to_lowercase().contains(&term)
}

/// Why a visible list came out empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmptyState {
    /// The store has no tasks at all.
    NoTasks,
    /// The store has tasks but none matched.
    NoMatches,
}

impl EmptyState {
    /// Message to show in place of the list.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NoTasks => "No tasks yet. Create your first task above!",
            Self::NoMatches => "No tasks match your search criteria.",
        }
    }
}

/// The tasks that passed the search and filter, plus the store size.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisibleTasks {
    /// Matching tasks in store order.
    pub tasks: Vec<Task>,
    /// Number of tasks in the store, matching or not.
    pub total: usize,
}

impl VisibleTasks {
    /// Check if nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of matching tasks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Explain an empty result, or `None` if something matched.
    #[must_use]
    pub fn empty_state(&self) -> Option<EmptyState> {
        match (self.tasks.is_empty(), self.total) {
            (false, _) => None,
            (true, 0) => Some(EmptyState::NoTasks),
            (true, _) => Some(EmptyState::NoMatches),
        }
    }
}

/// Derive the visible task list.
#[must_use]
pub fn visible(tasks: &[Task], term: &str, filter: Filter) -> VisibleTasks {
    let matching = tasks
        .iter()
        .filter(|task| matches_search(task, term) && filter.accepts(task))
        .cloned()
        .collect();
    VisibleTasks { tasks: matching, total: tasks.len() }
}

/// Search and filter state for one session.
///
/// The raw term follows every keystroke; the term used for querying is the
/// debounced one.
#[derive(Debug)]
pub struct SearchState {
    raw_term: String,
    debounced: Debouncer<String>,
    filter: Filter,
}

impl SearchState {
    /// Create an empty search state with the given debounce delay.
    #[must_use]
    pub fn new(debounce: Duration) -> Self {
        Self {
            raw_term: String::new(),
            debounced: Debouncer::new(String::new(), debounce),
            filter: Filter::All,
        }
    }

    /// Record a new raw search term. Must be called within a Tokio runtime.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.raw_term = term.into();
        self.debounced.observe(self.raw_term.clone());
    }

    /// The term as last typed.
    #[must_use]
    pub fn raw_term(&self) -> &str {
        &self.raw_term
    }

    /// The term the query currently uses.
    #[must_use]
    pub fn debounced_term(&self) -> String {
        self.debounced.current()
    }

    /// Check whether the debounced term still lags the raw term.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.debounced.is_pending()
    }

    /// Set the category filter. Takes effect immediately.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// The current category filter.
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// Derive the visible list for the current debounced term and filter.
    #[must_use]
    pub fn view(&self, tasks: &[Task]) -> VisibleTasks {
        visible(tasks, &self.debounced_term(), self.filter)
    }

    /// Clear the term and filter, dropping any pending debounce.
    pub fn reset(&mut self) {
        self.raw_term.clear();
        self.debounced.reset(String::new());
        self.filter = Filter::All;
    }
}
