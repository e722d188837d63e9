//! Draft validation with field-keyed error messages.

use super::models::{Priority, TaskDraft};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Date format accepted for due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A task field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// The task title.
    Title,
    /// The task description.
    Description,
    /// The due date.
    DueDate,
}

impl Field {
    /// Get the field name as reported to callers.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::DueDate => "dueDate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    /// Record a message for a field, replacing any earlier one.
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Get the message for a field.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Check whether a field failed.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// The failing fields, in a stable order.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.errors.keys().copied()
    }

    /// Iterate over `(field, message)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if no field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> =
            self.iter().map(|(field, message)| format!("{field}: {message}")).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// A draft that passed validation, with its text trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    /// Trimmed, non-empty title.
    pub title: String,
    /// Trimmed, non-empty description.
    pub description: String,
    /// Priority as submitted.
    pub priority: Priority,
    /// Due date.
    pub due_date: NaiveDate,
}

/// Check that a draft has a title, a description and a due date.
///
/// Title and description are checked after trimming.
///
/// # Errors
///
/// Returns the messages for every missing field.
pub fn validate_draft(draft: &TaskDraft) -> Result<ValidDraft, ValidationErrors> {
    let title = draft.title.trim();
    let description = draft.description.trim();

    let mut errors = ValidationErrors::default();
    if title.is_empty() {
        errors.insert(Field::Title, "Title is required");
    }
    if description.is_empty() {
        errors.insert(Field::Description, "Description is required");
    }
    match draft.due_date {
        Some(due_date) if errors.is_empty() => Ok(ValidDraft {
            title: title.to_string(),
            description: description.to_string(),
            priority: draft.priority,
            due_date,
        }),
        Some(_) => Err(errors),
        None => {
            errors.insert(Field::DueDate, "Due date is required");
            Err(errors)
        }
    }
}

/// Parse a due date as entered by a user.
///
/// An empty entry is not an error here: it yields `None`, which
/// [`validate_draft`] then reports as missing.
///
/// # Errors
///
/// Returns a due-date error if the entry is not a `YYYY-MM-DD` date.
pub fn parse_due_date(raw: &str) -> Result<Option<NaiveDate>, ValidationErrors> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT).map(Some).map_err(|_| {
        let mut errors = ValidationErrors::default();
        errors.insert(Field::DueDate, "Due date must be a valid date (YYYY-MM-DD)");
        errors
    })
}
