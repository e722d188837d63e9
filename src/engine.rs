//! Session-gated task engine.
//!
//! [`TaskEngine`] is the single entry point for callers. Every operation on
//! tasks, searches and notifications takes the [`Session`] returned by
//! [`TaskEngine::login`] and fails with [`Error::Unauthorized`] unless that
//! session is the active one.

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::notifications::{self, NotificationLogEntry, NotificationScheduler};
use crate::query::{self, Filter, SearchState, VisibleTasks};
use crate::session::{validate_credentials, Credentials, Session};
use crate::tasks::{Task, TaskDraft, TaskId, TaskStats, TaskStore};
use crate::workspace::{self, SharedWorkspace, Workspace};
use std::sync::Arc;
use tracing::{debug, info};

/// The task engine.
#[derive(Debug)]
pub struct TaskEngine {
    config: EngineConfig,
    workspace: SharedWorkspace,
    session: Option<Session>,
    search: SearchState,
    scheduler: NotificationScheduler,
}

impl TaskEngine {
    /// Create an engine with no active session.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the configuration does not validate.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            workspace: Workspace::new(config.notification_template.clone()).shared(),
            session: None,
            search: SearchState::new(config.search_debounce()),
            scheduler: NotificationScheduler::new(config.notification_interval()),
            config,
        })
    }

    /// The engine's configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The active session, if any.
    #[must_use]
    pub const fn active_session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Check whether the notification scheduler is running.
    #[must_use]
    pub fn is_scheduler_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Open a session.
    ///
    /// An already active session is ended first. Must be called within a
    /// Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the credentials are malformed. Nothing
    /// changes in that case.
    pub fn login(&mut self, credentials: &Credentials) -> Result<Session> {
        validate_credentials(credentials)?;

        if self.session.is_some() {
            debug!("login while a session is active, ending it first");
            self.end_session();
        }

        let session = Session::open(credentials);
        let epoch = workspace::lock(&self.workspace).begin_session(&session.email);
        self.scheduler.start(Arc::clone(&self.workspace), epoch);
        info!(email = %session.email, "session started");

        self.session = Some(session.clone());
        Ok(session)
    }

    /// End the session.
    ///
    /// Stops notifications, discards all tasks and the search state, and
    /// clears the notification log unless configured to retain it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn logout(&mut self, session: &Session) -> Result<()> {
        self.authorize(session)?;
        self.end_session();
        Ok(())
    }

    fn end_session(&mut self) {
        self.scheduler.stop();
        workspace::lock(&self.workspace)
            .end_session(self.config.retain_notifications_across_sessions);
        self.search.reset();
        if let Some(session) = self.session.take() {
            info!(email = %session.email, "session ended");
        }
    }

    fn authorize(&self, session: &Session) -> Result<()> {
        match &self.session {
            Some(active) if active.token == session.token => Ok(()),
            _ => Err(Error::Unauthorized),
        }
    }

    /// Derive the visible tasks for an explicit term and filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn list_visible_tasks(
        &self,
        session: &Session,
        term: &str,
        filter: Filter,
    ) -> Result<VisibleTasks> {
        self.authorize(session)?;
        let ws = workspace::lock(&self.workspace);
        Ok(query::visible(ws.store.tasks(), term, filter))
    }

    /// Record a new search term. It takes effect after the debounce delay.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn set_search_term(&mut self, session: &Session, term: impl Into<String>) -> Result<()> {
        self.authorize(session)?;
        self.search.set_search_term(term);
        Ok(())
    }

    /// Set the category filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn set_filter(&mut self, session: &Session, filter: Filter) -> Result<()> {
        self.authorize(session)?;
        self.search.set_filter(filter);
        Ok(())
    }

    /// The search state of the active session.
    #[must_use]
    pub const fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Derive the visible tasks for the debounced term and current filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn current_view(&self, session: &Session) -> Result<VisibleTasks> {
        self.authorize(session)?;
        let ws = workspace::lock(&self.workspace);
        Ok(self.search.view(ws.store.tasks()))
    }

    /// Create a task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] without an active session, or
    /// [`Error::Validation`] if the draft is incomplete.
    pub fn create_task(&self, session: &Session, draft: TaskDraft) -> Result<Task> {
        self.authorize(session)?;
        workspace::lock(&self.workspace).store.create_task(draft)
    }

    /// Replace a task's editable fields.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] without an active session,
    /// [`Error::Validation`] if the draft is incomplete, or
    /// [`Error::TaskNotFound`] if no task has this id.
    pub fn update_task(&self, session: &Session, id: TaskId, draft: TaskDraft) -> Result<Task> {
        self.authorize(session)?;
        workspace::lock(&self.workspace).store.update_task(id, draft)
    }

    /// Delete a task. Returns `false` if there was no such task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn delete_task(&self, session: &Session, id: TaskId) -> Result<bool> {
        self.authorize(session)?;
        Ok(workspace::lock(&self.workspace).store.delete_task(id))
    }

    /// Flip a task between pending and completed.
    ///
    /// Returns `None` if there was no such task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn toggle_task_complete(&self, session: &Session, id: TaskId) -> Result<Option<Task>> {
        self.authorize(session)?;
        Ok(workspace::lock(&self.workspace).store.toggle_complete(id))
    }

    /// Get a task by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn get_task(&self, session: &Session, id: TaskId) -> Result<Option<Task>> {
        self.authorize(session)?;
        Ok(workspace::lock(&self.workspace).store.get_task(id).cloned())
    }

    /// Summary counts over the session's tasks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn task_stats(&self, session: &Session) -> Result<TaskStats> {
        self.authorize(session)?;
        Ok(workspace::lock(&self.workspace).store.stats())
    }

    /// Every recorded notification, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn notification_log(&self, session: &Session) -> Result<Vec<NotificationLogEntry>> {
        self.authorize(session)?;
        Ok(workspace::lock(&self.workspace).notifications.entries().to_vec())
    }

    /// The most recent notifications, oldest first, up to the configured limit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn recent_notifications(&self, session: &Session) -> Result<Vec<NotificationLogEntry>> {
        self.authorize(session)?;
        let ws = workspace::lock(&self.workspace);
        Ok(ws.notifications.recent(self.config.recent_notification_limit).to_vec())
    }

    /// Run a notification scan now, outside the schedule.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Unauthorized`] if `session` is not the active one.
    pub fn scan_notifications(&self, session: &Session) -> Result<Option<NotificationLogEntry>> {
        self.authorize(session)?;
        let epoch = workspace::lock(&self.workspace).epoch();
        Ok(notifications::scan_if_current(&self.workspace, epoch))
    }
}
