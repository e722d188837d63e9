//! Interactive command host for taskdeck.
//!
//! The binary reads one command per line from stdin and runs it against a
//! [`TaskEngine`](crate::TaskEngine). Lines are split with
//! [`split_line`] and parsed with clap.

mod line;
mod run;


pub use line::{split_line, UnterminatedQuote};
pub use run::{CliOutput, Repl};

use crate::config::EngineConfig;
use crate::error::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Taskdeck - single-user task tracking with debounced search and
/// pending-task notifications.
///
/// Reads commands from stdin, one per line. Type `help` for the list.
#[derive(Parser, Debug)]
#[command(name = "taskdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of `.taskdeck/config.yaml`
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the search debounce delay, in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Override the notification interval, in seconds
    #[arg(long)]
    pub interval_secs: Option<u64>,

    /// Print results as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Load the engine configuration and apply command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be read or parsed.
    pub fn load_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::load_file(path)?,
            None => EngineConfig::load_or_default(&std::env::current_dir()?)?,
        };
        if let Some(ms) = self.debounce_ms {
            config.search_debounce_ms = ms;
        }
        if let Some(secs) = self.interval_secs {
            config.notification_interval_secs = secs;
        }
        Ok(config)
    }
}

/// One line of input.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, name = "taskdeck", disable_version_flag = true)]
pub struct CommandLine {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Commands accepted on stdin.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start a session.
    Login {
        /// Email address
        email: String,
        /// Password
        password: String,
    },

    /// End the session and discard its tasks.
    Logout,

    /// Create a task.
    Add {
        /// Task title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority: Low, Medium or High
        #[arg(short, long, default_value = "Medium")]
        priority: String,

        /// Due date (YYYY-MM-DD)
        #[arg(long, default_value = "")]
        due: String,
    },

    /// Edit a task. Only the given fields change.
    Edit {
        /// Task ID
        id: String,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New priority
        #[arg(short, long)]
        priority: Option<String>,

        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<String>,
    },

    /// Delete a task.
    Delete {
        /// Task ID
        id: String,
    },

    /// Mark a task completed, or pending again.
    Toggle {
        /// Task ID
        id: String,
    },

    /// Show a task.
    Get {
        /// Task ID
        id: String,
    },

    /// List tasks matching a term and filter, without debouncing.
    List {
        /// Search term
        #[arg(short, long, default_value = "")]
        search: String,

        /// Filter: All, Completed, Pending, Low, Medium or High
        #[arg(short, long, default_value = "All")]
        filter: String,
    },

    /// Set the search term. It applies once typing pauses.
    Search {
        /// Search term (empty clears the search)
        #[arg(default_value = "")]
        term: String,
    },

    /// Set the category filter.
    Filter {
        /// All, Completed, Pending, Low, Medium or High
        name: String,
    },

    /// Show the tasks for the current search and filter.
    Show,

    /// Show task counts.
    Stats,

    /// Show recent notifications.
    Notifications {
        /// Show the whole log
        #[arg(long)]
        all: bool,
    },

    /// Check for pending tasks now.
    Scan,

    /// Pause before reading the next command.
    Wait {
        /// Milliseconds to wait
        ms: u64,
    },

    /// Exit.
    Quit,
}
