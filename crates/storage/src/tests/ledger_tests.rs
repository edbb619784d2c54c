use chrono::{Duration, Utc};
use cmd_relay_core::Outcome;
use serde_json::json;

use super::{count_rows, create_test_storage};
use crate::storage::get_conn;

#[test]
fn test_record_successful_execution() {
    let (storage, _temp_dir) = create_test_storage();
    let session = storage.resolve_or_create_session("s1").unwrap();

    let payload = json!({"files": ["a.txt"]});
    let record = storage
        .record_execution(session.id, "list my files", Utc::now(), 42, &Outcome::Success(payload.clone()))
        .unwrap();

    assert_eq!(record.session_id, session.id);
    assert!(record.success);

    let history = storage.list_history(session.id, 50).unwrap();
    assert_eq!(history.len(), 1);
    let entry = &history[0];
    assert_eq!(entry.command, "list my files");
    assert_eq!(entry.execution_time, 42);
    assert!(entry.success);
    assert_eq!(entry.result, Some(payload));
    assert_eq!(entry.error, None);
    assert_eq!(count_rows(&storage, "commands"), 1);
    assert_eq!(count_rows(&storage, "results"), 1);
}

#[test]
fn test_record_failed_execution() {
    let (storage, _temp_dir) = create_test_storage();
    let session = storage.resolve_or_create_session("s1").unwrap();

    storage
        .record_execution(
            session.id,
            "send an email",
            Utc::now(),
            1200,
            &Outcome::Failure("upstream request timed out".to_owned()),
        )
        .unwrap();

    let history = storage.list_history(session.id, 50).unwrap();
    assert_eq!(history.len(), 1);
    let entry = &history[0];
    assert!(!entry.success);
    assert_eq!(entry.result, None);
    assert_eq!(entry.error.as_deref(), Some("upstream request timed out"));
}

#[test]
fn test_history_is_newest_first_and_bounded() {
    let (storage, _temp_dir) = create_test_storage();
    let session = storage.resolve_or_create_session("s1").unwrap();
    let base = Utc::now();

    for i in 0..55i64 {
        storage
            .record_execution(
                session.id,
                &format!("command {i}"),
                base + Duration::seconds(i),
                10,
                &Outcome::Success(json!({"n": i})),
            )
            .unwrap();
    }

    let history = storage.list_history(session.id, 500).unwrap();
    assert_eq!(history.len(), 50);
    assert_eq!(history[0].command, "command 54");
    assert!(history.windows(2).all(|w| w[0].executed_at >= w[1].executed_at));
}

#[test]
fn test_history_tolerates_missing_result_row() {
    let (storage, _temp_dir) = create_test_storage();
    let session = storage.resolve_or_create_session("s1").unwrap();
    storage
        .record_execution(session.id, "orphan", Utc::now(), 5, &Outcome::Success(json!({})))
        .unwrap();

    let conn = get_conn(&storage.pool).unwrap();
    conn.execute("DELETE FROM results", []).unwrap();
    drop(conn);

    let history = storage.list_history(session.id, 50).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result, None);
    assert_eq!(history[0].error, None);
}

#[test]
fn test_clear_history_scoped_to_session() {
    let (storage, _temp_dir) = create_test_storage();
    let mine = storage.resolve_or_create_session("mine").unwrap();
    let theirs = storage.resolve_or_create_session("theirs").unwrap();

    for _ in 0..3 {
        storage
            .record_execution(mine.id, "x", Utc::now(), 1, &Outcome::Success(json!({})))
            .unwrap();
    }
    storage
        .record_execution(theirs.id, "y", Utc::now(), 1, &Outcome::Failure("nope".to_owned()))
        .unwrap();

    let removed = storage.clear_history(mine.id).unwrap();

    assert_eq!(removed, 3);
    assert!(storage.list_history(mine.id, 50).unwrap().is_empty());
    assert_eq!(storage.list_history(theirs.id, 50).unwrap().len(), 1);
    assert_eq!(count_rows(&storage, "commands"), 1);
    assert_eq!(count_rows(&storage, "results"), 1);
}
