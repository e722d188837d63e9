//! Session-scoped state shared between the engine and the scheduler.

use crate::notifications::NotificationLog;
use crate::tasks::{InMemoryTaskStore, TaskStore};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Workspace handle shared with background tasks.
pub type SharedWorkspace = Arc<Mutex<Workspace>>;

/// The store, the notification log and the session epoch.
///
/// The epoch changes whenever a session ends. Background work captures the
/// epoch it was started under and must not touch the workspace once it
/// differs.
#[derive(Debug, Default)]
pub struct Workspace {
    /// Tasks of the active session.
    pub store: InMemoryTaskStore,
    /// Notifications recorded so far.
    pub notifications: NotificationLog,
    /// Template overriding the notification message.
    pub notification_template: Option<String>,
    epoch: u64,
    owner: Option<String>,
}

impl Workspace {
    /// Create an empty workspace.
    #[must_use]
    pub fn new(notification_template: Option<String>) -> Self {
        Self { notification_template, ..Self::default() }
    }

    /// Wrap the workspace for sharing.
    #[must_use]
    pub fn shared(self) -> SharedWorkspace {
        Arc::new(Mutex::new(self))
    }

    /// Current session epoch.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Email of the session owner, if a session is active.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    /// Record the owner of a new session and return the session's epoch.
    pub fn begin_session(&mut self, owner: &str) -> u64 {
        self.owner = Some(owner.to_string());
        self.epoch
    }

    /// End the current session.
    ///
    /// Bumps the epoch, empties the store and, unless `retain_notifications`
    /// is set, empties the notification log.
    pub fn end_session(&mut self, retain_notifications: bool) {
        self.epoch += 1;
        self.owner = None;
        self.store.clear();
        if !retain_notifications {
            self.notifications.clear();
        }
    }
}

/// Lock a shared workspace, recovering the data if a holder panicked.
pub fn lock(workspace: &SharedWorkspace) -> MutexGuard<'_, Workspace> {
    workspace.lock().unwrap_or_else(PoisonError::into_inner)
}
