//! Error types for `taskdeck`.

use crate::session::AuthError;
use crate::tasks::{TaskId, ValidationErrors};

/// Errors that can occur in the task engine.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A task draft failed validation. No state was changed.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Login was rejected.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// The operation requires an active session and none matched.
    #[error("Not authorized: no active session")]
    Unauthorized,

    /// An update referenced a task that does not exist.
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    /// A value supplied by the caller could not be parsed.
    #[error("{0}")]
    InvalidInput(String),

    /// The engine configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A template error occurred.
    #[error("Template error: {0}")]
    Template(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::Field;

    #[test]
    fn test_task_not_found_display() {
        let err = Error::TaskNotFound(TaskId::new(42));
        assert_eq!(err.to_string(), "Task not found: 42");
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let mut errors = ValidationErrors::default();
        errors.insert(Field::Title, "Title is required");
        let err = Error::from(errors);
        assert_eq!(err.to_string(), "title: Title is required");
    }

    #[test]
    fn test_auth_error_is_transparent() {
        let err = Error::from(AuthError::InvalidEmail);
        assert_eq!(err.to_string(), "Please enter a valid email");
    }
}
