//! Pending-task notifications.
//!
//! - [`NotificationLog`]: append-only record of notifications
//! - [`NotificationScheduler`]: interval scans while a session is active

pub mod log;
pub mod scheduler;

pub use log::{NotificationLog, NotificationLogEntry};
pub use scheduler::{scan, scan_if_current, NotificationScheduler};
