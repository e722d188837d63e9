//! # `taskdeck`
//!
//! Single-user task tracking: a session-gated task store with debounced
//! search, category filters and periodic pending-task notifications.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod debounce;
pub mod engine;
pub mod error;
pub mod notifications;
pub mod paths;
pub mod query;
pub mod session;
pub mod tasks;
pub mod templates;
pub mod workspace;

pub use config::EngineConfig;
pub use engine::TaskEngine;
pub use error::{Error, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
