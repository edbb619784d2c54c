//! Test utilities and module declarations for storage tests.

use crate::storage::get_conn;
use crate::Storage;
use tempfile::TempDir;

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

#[expect(clippy::unwrap_used, reason = "test code")]
pub fn count_rows(storage: &Storage, table: &str) -> i64 {
    let conn = get_conn(&storage.pool).unwrap();
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0)).unwrap()
}

mod analytics_tests;
mod ledger_tests;
mod session_tests;
