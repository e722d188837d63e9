//! Command execution for the command host.
//!
//! This module runs parsed commands against the engine and collects their
//! output.

use crate::cli::{split_line, Command, CommandLine};
use crate::engine::TaskEngine;
use crate::error::Error;
use crate::notifications::NotificationLogEntry;
use crate::query::{Filter, VisibleTasks};
use crate::session::{Credentials, Session};
use crate::tasks::{
    parse_due_date, validate_draft, Priority, Task, TaskDraft, TaskId, TaskStats, ValidationErrors,
};
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::Parser;
use serde::Serialize;
use std::process::ExitCode;
use std::time::Duration;

/// Output from running a command, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the command.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

impl CliOutput {
    fn ok(stdout: Vec<String>) -> Self {
        Self { exit_code: ExitCode::SUCCESS, stdout, stderr: vec![] }
    }

    fn empty() -> Self {
        Self::ok(vec![])
    }

    fn error(message: impl Into<String>) -> Self {
        Self { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message.into()] }
    }
}

/// Interactive session over a [`TaskEngine`].
#[derive(Debug)]
pub struct Repl {
    engine: TaskEngine,
    session: Option<Session>,
    json: bool,
    finished: bool,
}

impl Repl {
    /// Create a host around an engine. `json` switches results to JSON.
    #[must_use]
    pub const fn new(engine: TaskEngine, json: bool) -> Self {
        Self { engine, session: None, json, finished: false }
    }

    /// The underlying engine.
    #[must_use]
    pub const fn engine(&self) -> &TaskEngine {
        &self.engine
    }

    /// Check whether `quit` has been run.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Split, parse and run one line of input. Blank lines do nothing.
    pub async fn execute_line(&mut self, line: &str) -> CliOutput {
        let words = match split_line(line) {
            Ok(words) => words,
            Err(e) => return CliOutput::error(format!("Error: {e}")),
        };
        if words.is_empty() {
            return CliOutput::empty();
        }

        match CommandLine::try_parse_from(words) {
            Ok(parsed) => self.run(parsed.command).await,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                CliOutput::ok(vec![e.to_string().trim_end().to_string()])
            }
            Err(e) => CliOutput::error(e.to_string().trim_end().to_string()),
        }
    }

    /// Run a parsed command.
    pub async fn run(&mut self, command: Command) -> CliOutput {
        if let Command::Wait { ms } = command {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            return CliOutput::empty();
        }
        match self.dispatch(command) {
            Ok(output) => output,
            Err(e) => self.error_output(&e),
        }
    }

    fn dispatch(&mut self, command: Command) -> Result<CliOutput, Error> {
        if let Command::Login { email, password } = command {
            return self.run_login(&Credentials::new(email, password));
        }
        if command == Command::Quit {
            self.finished = true;
            return Ok(CliOutput::empty());
        }

        let session = self.session.clone().ok_or(Error::Unauthorized)?;
        match command {
            Command::Logout => {
                self.engine.logout(&session)?;
                self.session = None;
                Ok(CliOutput::ok(vec!["Logged out".to_string()]))
            }
            Command::Add { title, description, priority, due } => {
                let priority = parse_priority(&priority)?;
                let (due_date, due_error) = split_due(&due);
                let draft = TaskDraft::new(title, description, priority, due_date);
                reject_bad_due(&draft, due_error)?;
                let task = self.engine.create_task(&session, draft)?;
                Ok(self.task_output(&task, "Created"))
            }
            Command::Edit { id, title, description, priority, due } => {
                let id = parse_id(&id)?;
                let current =
                    self.engine.get_task(&session, id)?.ok_or(Error::TaskNotFound(id))?;
                let mut draft = TaskDraft::from(&current);
                if let Some(title) = title {
                    draft.title = title;
                }
                if let Some(description) = description {
                    draft.description = description;
                }
                if let Some(priority) = priority {
                    draft.priority = parse_priority(&priority)?;
                }
                let mut due_error = None;
                if let Some(due) = due {
                    (draft.due_date, due_error) = split_due(&due);
                }
                reject_bad_due(&draft, due_error)?;
                let task = self.engine.update_task(&session, id, draft)?;
                Ok(self.task_output(&task, "Updated"))
            }
            Command::Delete { id } => {
                let id = parse_id(&id)?;
                if self.engine.delete_task(&session, id)? {
                    Ok(CliOutput::ok(vec![format!("Deleted task {id}")]))
                } else {
                    Ok(CliOutput::ok(vec![format!("No task {id}, nothing deleted")]))
                }
            }
            Command::Toggle { id } => {
                let id = parse_id(&id)?;
                match self.engine.toggle_task_complete(&session, id)? {
                    Some(task) => Ok(self.task_output(&task, "Toggled")),
                    None => Ok(CliOutput::ok(vec![format!("No task {id}, nothing toggled")])),
                }
            }
            Command::Get { id } => {
                let id = parse_id(&id)?;
                let task = self.engine.get_task(&session, id)?.ok_or(Error::TaskNotFound(id))?;
                Ok(self.task_output(&task, ""))
            }
            Command::List { search, filter } => {
                let filter = parse_filter(&filter)?;
                let view = self.engine.list_visible_tasks(&session, &search, filter)?;
                Ok(self.view_output(&view))
            }
            Command::Search { term } => {
                self.engine.set_search_term(&session, term)?;
                Ok(CliOutput::empty())
            }
            Command::Filter { name } => {
                let filter = parse_filter(&name)?;
                self.engine.set_filter(&session, filter)?;
                Ok(CliOutput::empty())
            }
            Command::Show => {
                let view = self.engine.current_view(&session)?;
                Ok(self.view_output(&view))
            }
            Command::Stats => {
                let stats = self.engine.task_stats(&session)?;
                Ok(self.stats_output(&stats))
            }
            Command::Notifications { all } => {
                let entries = if all {
                    self.engine.notification_log(&session)?
                } else {
                    self.engine.recent_notifications(&session)?
                };
                Ok(self.notifications_output(&entries))
            }
            Command::Scan => match self.engine.scan_notifications(&session)? {
                Some(entry) => Ok(self.notifications_output(&[entry])),
                None => Ok(CliOutput::ok(vec!["No pending tasks".to_string()])),
            },
            Command::Login { .. } | Command::Wait { .. } | Command::Quit => {
                Ok(CliOutput::empty())
            }
        }
    }

    fn run_login(&mut self, credentials: &Credentials) -> Result<CliOutput, Error> {
        let session = self.engine.login(credentials)?;
        let line = format!("Logged in as {}", session.email);
        let output = if self.json { json_line(&session) } else { line };
        self.session = Some(session);
        Ok(CliOutput::ok(vec![output]))
    }

    fn task_output(&self, task: &Task, verb: &str) -> CliOutput {
        if self.json {
            return CliOutput::ok(vec![json_line(task)]);
        }
        let line = format_task(task);
        if verb.is_empty() {
            CliOutput::ok(vec![line, format!("    {}", task.description)])
        } else {
            CliOutput::ok(vec![format!("{verb}: {line}")])
        }
    }

    fn view_output(&self, view: &VisibleTasks) -> CliOutput {
        if self.json {
            return CliOutput::ok(vec![json_line(view)]);
        }
        match view.empty_state() {
            Some(empty) => CliOutput::ok(vec![empty.message().to_string()]),
            None => CliOutput::ok(view.tasks.iter().map(format_task).collect()),
        }
    }

    fn stats_output(&self, stats: &TaskStats) -> CliOutput {
        if self.json {
            return CliOutput::ok(vec![json_line(stats)]);
        }
        CliOutput::ok(vec![format!(
            "Total: {}  Completed: {}  Pending: {}  High priority pending: {}",
            stats.total, stats.completed, stats.pending, stats.high_priority_pending
        )])
    }

    fn notifications_output(&self, entries: &[NotificationLogEntry]) -> CliOutput {
        if self.json {
            return CliOutput::ok(vec![json_line(&entries)]);
        }
        if entries.is_empty() {
            return CliOutput::ok(vec!["No notifications".to_string()]);
        }
        CliOutput::ok(
            entries
                .iter()
                .map(|entry| {
                    format!("{} {}", entry.timestamp.format("%Y-%m-%d %H:%M:%S"), entry.message)
                })
                .collect(),
        )
    }

    fn error_output(&self, error: &Error) -> CliOutput {
        match error {
            Error::Validation(errors) if self.json => {
                CliOutput::error(json_line(&serde_json::json!({ "errors": errors })))
            }
            Error::Validation(errors) => {
                let mut output = CliOutput::error("Error: task is invalid");
                output
                    .stderr
                    .extend(errors.iter().map(|(field, message)| format!("  {field}: {message}")));
                output
            }
            other => CliOutput::error(format!("Error: {other}")),
        }
    }
}

fn format_task(task: &Task) -> String {
    let mark = if task.is_completed() { "x" } else { " " };
    format!(
        "[{mark}] {} {} ({}, due {})",
        task.id,
        task.title,
        task.priority,
        task.due_date.format("%Y-%m-%d")
    )
}

fn json_line<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Parse a due date, keeping a parse failure aside so the rest of the draft
/// can still be validated.
fn split_due(raw: &str) -> (Option<NaiveDate>, Option<ValidationErrors>) {
    match parse_due_date(raw) {
        Ok(due_date) => (due_date, None),
        Err(errors) => (None, Some(errors)),
    }
}

/// Fail with every invalid field when the due date did not parse.
fn reject_bad_due(draft: &TaskDraft, due_error: Option<ValidationErrors>) -> Result<(), Error> {
    let Some(due_error) = due_error else {
        return Ok(());
    };
    let mut errors = validate_draft(draft).err().unwrap_or_default();
    for (field, message) in due_error.iter() {
        errors.insert(field, message);
    }
    Err(Error::Validation(errors))
}

fn parse_id(raw: &str) -> Result<TaskId, Error> {
    raw.parse().map_err(|_| Error::InvalidInput(format!("invalid task id: '{raw}'")))
}

fn parse_priority(raw: &str) -> Result<Priority, Error> {
    Priority::from_str(raw).map_err(|e| Error::InvalidInput(e.to_string()))
}

fn parse_filter(raw: &str) -> Result<Filter, Error> {
    Filter::from_str(raw).map_err(|e| Error::InvalidInput(e.to_string()))
}
