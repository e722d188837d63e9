//! Integration tests for `taskdeck`.

use chrono::NaiveDate;
use std::time::Duration;
use taskdeck::query::{EmptyState, Filter};
use taskdeck::session::Credentials;
use taskdeck::tasks::{Priority, Status, TaskDraft};
use taskdeck::{EngineConfig, Error, TaskEngine, VERSION};
use tempfile::TempDir;
use tokio::time::sleep;

fn draft(title: &str, description: &str, priority: Priority) -> TaskDraft {
    TaskDraft::new(title, description, priority, NaiveDate::from_ymd_opt(2024, 9, 30))
}

#[test]
fn test_version_exists() {
    assert!(!VERSION.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_full_session() {
    let mut engine = TaskEngine::new(EngineConfig::default()).unwrap();
    let session = engine.login(&Credentials::new("a@b.c", "x")).unwrap();

    let milk = engine.create_task(&session, draft("Buy milk", "Corner shop", Priority::Low)).unwrap();
    let report = engine
        .create_task(&session, draft("Ship report", "Quarterly numbers", Priority::High))
        .unwrap();
    engine.toggle_task_complete(&session, report.id).unwrap();

    let pending = engine.list_visible_tasks(&session, "", Filter::Pending).unwrap();
    assert_eq!(pending.tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![milk.id]);

    engine.set_search_term(&session, "QUARTER").unwrap();
    sleep(Duration::from_millis(501)).await;
    let view = engine.current_view(&session).unwrap();
    assert_eq!(view.tasks.len(), 1);
    assert_eq!(view.tasks[0].status, Status::Completed);

    sleep(Duration::from_secs(20 * 60)).await;
    let log = engine.notification_log(&session).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].pending_count, 1);

    engine.logout(&session).unwrap();
    assert!(matches!(engine.task_stats(&session), Err(Error::Unauthorized)));

    let session = engine.login(&Credentials::new("a@b.c", "x")).unwrap();
    let view = engine.list_visible_tasks(&session, "", Filter::All).unwrap();
    assert_eq!(view.empty_state(), Some(EmptyState::NoTasks));
    assert!(engine.notification_log(&session).unwrap().is_empty());
}

#[tokio::test]
async fn test_engine_from_config_file() {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig {
        notification_template: Some("{{ pending_count }} left".to_string()),
        ..EngineConfig::default()
    };
    config.save_to(dir.path()).unwrap();

    let loaded = EngineConfig::load_or_default(dir.path()).unwrap();
    let mut engine = TaskEngine::new(loaded).unwrap();
    let session = engine.login(&Credentials::new("a@b.c", "x")).unwrap();
    engine.create_task(&session, draft("A", "B", Priority::Medium)).unwrap();

    let entry = engine.scan_notifications(&session).unwrap().unwrap();
    assert_eq!(entry.message, "1 left");
}

#[test]
fn test_invalid_template_rejected_at_startup() {
    let config = EngineConfig {
        notification_template: Some("{% for %}".to_string()),
        ..EngineConfig::default()
    };
    assert!(matches!(TaskEngine::new(config), Err(Error::InvalidConfig(_))));
}
