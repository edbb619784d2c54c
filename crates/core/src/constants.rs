//! Shared constants for cmd-relay.
//!
//! Centralizes magic numbers that would otherwise be duplicated across crates.

/// Maximum history entries returned per page.
pub const HISTORY_PAGE_LIMIT: usize = 50;

/// Default wait on the upstream executor call, in seconds.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Default SQLite connection pool size.
pub const DEFAULT_DB_POOL_SIZE: u32 = 8;
