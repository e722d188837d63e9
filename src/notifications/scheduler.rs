//! Periodic pending-task notifications.
//!
//! While a session is active the scheduler counts pending tasks on a fixed
//! interval and records a notification whenever any are pending. Email
//! delivery is only logged.

use super::log::NotificationLogEntry;
use crate::tasks::TaskStore;
use crate::templates;
use crate::workspace::{self, SharedWorkspace, Workspace};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Count pending tasks and record a notification if there are any.
///
/// Returns the recorded entry, or `None` when nothing is pending.
pub fn scan(workspace: &mut Workspace, now: DateTime<Utc>) -> Option<NotificationLogEntry> {
    let pending_count = workspace.store.pending_count();
    if pending_count == 0 {
        debug!("notification scan found no pending tasks");
        return None;
    }

    let message = templates::render_pending_notification(
        pending_count,
        workspace.notification_template.as_deref(),
    );
    let entry = NotificationLogEntry { timestamp: now, message, pending_count };
    workspace.notifications.push(entry.clone());

    info!(
        to = workspace.owner().unwrap_or("unknown"),
        pending = pending_count,
        message = %entry.message,
        "would send email notification"
    );
    Some(entry)
}

/// Scan only if the workspace is still in the given session epoch.
pub fn scan_if_current(workspace: &SharedWorkspace, epoch: u64) -> Option<NotificationLogEntry> {
    let mut ws = workspace::lock(workspace);
    if ws.epoch() != epoch {
        debug!(epoch, current = ws.epoch(), "discarding scan from ended session");
        return None;
    }
    scan(&mut ws, Utc::now())
}

#[derive(Debug)]
struct Running {
    epoch: u64,
    shutdown: Arc<Notify>,
    handle: JoinHandle<()>,
}

/// Runs notification scans while a session is active.
///
/// Idle until [`start`](Self::start), running until [`stop`](Self::stop).
#[derive(Debug)]
pub struct NotificationScheduler {
    interval: Duration,
    running: Option<Running>,
}

impl NotificationScheduler {
    /// Create an idle scheduler.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval, running: None }
    }

    /// Check whether scans are scheduled.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.as_ref().is_some_and(|running| !running.handle.is_finished())
    }

    /// Epoch of the session being scanned, if running.
    #[must_use]
    pub fn epoch(&self) -> Option<u64> {
        self.running.as_ref().map(|running| running.epoch)
    }

    /// Scan once now, then every interval, for the session `epoch`.
    ///
    /// Must be called within a Tokio runtime. Does nothing if already running.
    pub fn start(&mut self, workspace: SharedWorkspace, epoch: u64) {
        if self.is_running() {
            return;
        }

        scan_if_current(&workspace, epoch);

        let shutdown = Arc::new(Notify::new());
        let stop = Arc::clone(&shutdown);
        let interval = self.interval;
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    () = tokio::time::sleep(interval) => {
                        scan_if_current(&workspace, epoch);
                    }
                    () = stop.notified() => break,
                }
            }
        });

        debug!(epoch, interval_secs = interval.as_secs(), "notification scheduler started");
        self.running = Some(Running { epoch, shutdown, handle });
    }

    /// Cancel scheduled scans. Does nothing if idle.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            running.shutdown.notify_one();
            running.handle.abort();
            debug!(epoch = running.epoch, "notification scheduler stopped");
        }
    }
}

impl Drop for NotificationScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::{Priority, TaskDraft};
    use crate::workspace::Workspace;
    use chrono::NaiveDate;
    use tokio::time::sleep;

    const INTERVAL: Duration = Duration::from_secs(1200);

    fn add_pending(ws: &SharedWorkspace, n: usize) {
        let mut ws = workspace::lock(ws);
        for i in 0..n {
            let draft = TaskDraft::new(
                format!("Task {i}"),
                "Details",
                Priority::Medium,
                NaiveDate::from_ymd_opt(2024, 1, 1),
            );
            ws.store.create_task(draft).unwrap();
        }
    }

    fn log_counts(ws: &SharedWorkspace) -> Vec<usize> {
        workspace::lock(ws).notifications.entries().iter().map(|e| e.pending_count).collect()
    }

    #[test]
    fn test_scan_with_pending_tasks() {
        let shared = Workspace::new(None).shared();
        add_pending(&shared, 3);

        let entry = scan(&mut workspace::lock(&shared), Utc::now()).unwrap();
        assert_eq!(entry.pending_count, 3);
        assert_eq!(entry.message, "Email notification: You have 3 pending task(s)");
        assert_eq!(log_counts(&shared), vec![3]);
    }

    #[test]
    fn test_scan_without_pending_tasks() {
        let shared = Workspace::new(None).shared();
        assert!(scan(&mut workspace::lock(&shared), Utc::now()).is_none());
        assert!(log_counts(&shared).is_empty());
    }

    #[test]
    fn test_scan_ignores_completed_tasks() {
        let shared = Workspace::new(None).shared();
        add_pending(&shared, 2);
        {
            let mut ws = workspace::lock(&shared);
            let id = ws.store.tasks()[0].id;
            ws.store.toggle_complete(id);
        }
        let entry = scan(&mut workspace::lock(&shared), Utc::now()).unwrap();
        assert_eq!(entry.pending_count, 1);
    }

    #[test]
    fn test_scan_uses_template_override() {
        let shared = Workspace::new(Some("{{ pending_count }} to do".to_string())).shared();
        add_pending(&shared, 2);
        let entry = scan(&mut workspace::lock(&shared), Utc::now()).unwrap();
        assert_eq!(entry.message, "2 to do");
    }

    #[test]
    fn test_stale_epoch_is_discarded() {
        let shared = Workspace::new(None).shared();
        add_pending(&shared, 1);
        workspace::lock(&shared).end_session(false);
        add_pending(&shared, 1);

        assert!(scan_if_current(&shared, 0).is_none());
        assert!(scan_if_current(&shared, 1).is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_scans_every_interval() {
        let shared = Workspace::new(None).shared();
        let mut scheduler = NotificationScheduler::new(INTERVAL);

        scheduler.start(Arc::clone(&shared), 0);
        assert!(scheduler.is_running());
        assert!(log_counts(&shared).is_empty());

        add_pending(&shared, 3);
        sleep(INTERVAL + Duration::from_millis(1)).await;
        assert_eq!(log_counts(&shared), vec![3]);

        sleep(INTERVAL).await;
        assert_eq!(log_counts(&shared), vec![3, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_completed_tasks_stop_notifications() {
        let shared = Workspace::new(None).shared();
        let mut scheduler = NotificationScheduler::new(INTERVAL);
        scheduler.start(Arc::clone(&shared), 0);

        add_pending(&shared, 3);
        sleep(INTERVAL + Duration::from_millis(1)).await;
        assert_eq!(log_counts(&shared), vec![3]);

        {
            let mut ws = workspace::lock(&shared);
            let ids: Vec<_> = ws.store.tasks().iter().map(|task| task.id).collect();
            for id in ids {
                ws.store.toggle_complete(id);
            }
        }
        sleep(INTERVAL).await;
        assert_eq!(log_counts(&shared), vec![3]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_scans_immediately() {
        let shared = Workspace::new(None).shared();
        add_pending(&shared, 2);

        let mut scheduler = NotificationScheduler::new(INTERVAL);
        scheduler.start(Arc::clone(&shared), 0);
        assert_eq!(log_counts(&shared), vec![2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_scans_after_stop() {
        let shared = Workspace::new(None).shared();
        add_pending(&shared, 1);

        let mut scheduler = NotificationScheduler::new(INTERVAL);
        scheduler.start(Arc::clone(&shared), 0);
        scheduler.stop();
        assert!(!scheduler.is_running());

        sleep(INTERVAL * 3).await;
        assert_eq!(log_counts(&shared), vec![1]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_scans_after_session_ends() {
        let shared = Workspace::new(None).shared();
        let mut scheduler = NotificationScheduler::new(INTERVAL);
        scheduler.start(Arc::clone(&shared), 0);

        {
            let mut ws = workspace::lock(&shared);
            ws.end_session(false);
        }
        add_pending(&shared, 4);

        sleep(INTERVAL * 2).await;
        assert!(log_counts(&shared).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_keeps_first_run() {
        let shared = Workspace::new(None).shared();
        let mut scheduler = NotificationScheduler::new(INTERVAL);
        scheduler.start(Arc::clone(&shared), 0);
        scheduler.start(Arc::clone(&shared), 7);
        assert_eq!(scheduler.epoch(), Some(0));
    }
}
