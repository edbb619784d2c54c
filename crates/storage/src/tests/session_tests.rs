use super::{count_rows, create_test_storage};

#[test]
fn test_resolve_creates_exactly_one_session() {
    let (storage, _temp_dir) = create_test_storage();

    let session = storage.resolve_or_create_session("session_abc").unwrap();

    assert_eq!(session.token, "session_abc");
    assert_eq!(session.created_at, session.last_active);
    assert_eq!(count_rows(&storage, "sessions"), 1);
}

#[test]
fn test_resolve_existing_touches_last_active() {
    let (storage, _temp_dir) = create_test_storage();

    let first = storage.resolve_or_create_session("session_abc").unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let second = storage.resolve_or_create_session("session_abc").unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.last_active >= first.last_active);
    assert_eq!(count_rows(&storage, "sessions"), 1);
}

#[test]
fn test_distinct_tokens_get_distinct_sessions() {
    let (storage, _temp_dir) = create_test_storage();

    let a = storage.resolve_or_create_session("token-a").unwrap();
    let b = storage.resolve_or_create_session("token-b").unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(count_rows(&storage, "sessions"), 2);
}

#[test]
fn test_concurrent_first_contact_creates_one_row() {
    let (storage, _temp_dir) = create_test_storage();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let storage = storage.clone();
            std::thread::spawn(move || storage.resolve_or_create_session("race-token").unwrap())
        })
        .collect();

    let ids: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap().id).collect();

    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(count_rows(&storage, "sessions"), 1);
}

#[test]
fn test_get_session_does_not_create() {
    let (storage, _temp_dir) = create_test_storage();

    assert!(storage.get_session("never-seen").unwrap().is_none());
    assert_eq!(count_rows(&storage, "sessions"), 0);
}
