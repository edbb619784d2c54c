//! Migration v1: Initial schema
//!
//! The CHECK constraint on results enforces the exactly-one-of
//! payload/error invariant at the storage boundary.

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    token TEXT NOT NULL UNIQUE,
    created_at TEXT NOT NULL,
    last_active TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS commands (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id INTEGER NOT NULL REFERENCES sessions(id),
    command TEXT NOT NULL,
    executed_at TEXT NOT NULL,
    execution_time INTEGER NOT NULL,
    success INTEGER NOT NULL,
    CHECK (execution_time >= 0)
);

CREATE TABLE IF NOT EXISTS results (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    command_id INTEGER NOT NULL REFERENCES commands(id),
    result_data TEXT,
    error_message TEXT,
    CHECK ((result_data IS NULL) <> (error_message IS NULL))
);

CREATE INDEX IF NOT EXISTS idx_commands_session ON commands(session_id);
CREATE INDEX IF NOT EXISTS idx_commands_executed ON commands(executed_at);
CREATE INDEX IF NOT EXISTS idx_results_command ON results(command_id);
";
