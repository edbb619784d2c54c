use chrono::Utc;
use cmd_relay_core::Outcome;
use serde_json::json;

use super::create_test_storage;

#[test]
fn test_counts_partition_the_ledger() {
    let (storage, _temp_dir) = create_test_storage();
    let session = storage.resolve_or_create_session("s1").unwrap();

    for _ in 0..3 {
        storage
            .record_execution(session.id, "ok", Utc::now(), 10, &Outcome::Success(json!({})))
            .unwrap();
    }
    for _ in 0..2 {
        storage
            .record_execution(session.id, "bad", Utc::now(), 10, &Outcome::Failure("e".to_owned()))
            .unwrap();
    }

    let total = storage.count_commands(session.id).unwrap();
    let successful = storage.count_commands_by_success(session.id, true).unwrap();
    let failed = storage.count_commands_by_success(session.id, false).unwrap();

    assert_eq!(total, 5);
    assert_eq!(successful, 3);
    assert_eq!(failed, 2);
    assert_eq!(total, successful + failed);
}

#[test]
fn test_avg_covers_successful_records_only() {
    let (storage, _temp_dir) = create_test_storage();
    let session = storage.resolve_or_create_session("s1").unwrap();

    storage
        .record_execution(session.id, "a", Utc::now(), 100, &Outcome::Success(json!({})))
        .unwrap();
    storage
        .record_execution(session.id, "b", Utc::now(), 101, &Outcome::Success(json!({})))
        .unwrap();
    // Slow failure must not drag the average
    storage
        .record_execution(session.id, "c", Utc::now(), 30000, &Outcome::Failure("e".to_owned()))
        .unwrap();

    let avg = storage.avg_successful_execution_time(session.id).unwrap();
    assert_eq!(avg, 101); // 100.5 rounds to nearest
}

#[test]
fn test_avg_is_zero_without_successes() {
    let (storage, _temp_dir) = create_test_storage();
    let session = storage.resolve_or_create_session("s1").unwrap();

    storage
        .record_execution(session.id, "a", Utc::now(), 500, &Outcome::Failure("e".to_owned()))
        .unwrap();

    assert_eq!(storage.avg_successful_execution_time(session.id).unwrap(), 0);
}

#[test]
fn test_empty_session_has_zero_aggregates() {
    let (storage, _temp_dir) = create_test_storage();
    let session = storage.resolve_or_create_session("s1").unwrap();

    assert_eq!(storage.count_commands(session.id).unwrap(), 0);
    assert_eq!(storage.count_commands_by_success(session.id, true).unwrap(), 0);
    assert_eq!(storage.count_commands_by_success(session.id, false).unwrap(), 0);
    assert_eq!(storage.avg_successful_execution_time(session.id).unwrap(), 0);
}
