// ==========================================
// Club Attendance - SQLite connection setup
// ==========================================
// Goals:
// - one place for the PRAGMAs every connection needs
// - idempotent schema creation for the tables the engine reads
// Dates are stored as `%Y-%m-%d` text (rusqlite chrono feature).
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// Default busy_timeout (ms)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Schema version written by `init_schema`
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// Per-connection PRAGMAs.
///
/// foreign_keys and busy_timeout are connection-scoped in SQLite.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the shared configuration
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// In-memory connection with the schema applied (tests, dry runs)
pub fn open_in_memory() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    configure_sqlite_connection(&conn)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Read schema_version (None when the table does not exist)
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

/// Create every table and index if missing
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_scope (
            scope_id TEXT PRIMARY KEY,
            scope_type TEXT NOT NULL,
            scope_key TEXT NOT NULL,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(scope_type, scope_key)
        );

        INSERT OR IGNORE INTO config_scope (scope_id, scope_type, scope_key)
        VALUES ('global', 'GLOBAL', 'global');

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL REFERENCES config_scope(scope_id) ON DELETE CASCADE,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS academic_period (
            year INTEGER PRIMARY KEY,
            start_date TEXT NOT NULL,
            end_date TEXT NOT NULL,
            active INTEGER NOT NULL DEFAULT 1,
            description TEXT,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            CHECK (start_date <= end_date)
        );

        CREATE TABLE IF NOT EXISTS calendar_exception (
            exception_id TEXT PRIMARY KEY,
            exception_date TEXT NOT NULL,
            reason TEXT NOT NULL,
            exception_type TEXT NOT NULL DEFAULT 'holiday',
            active INTEGER NOT NULL DEFAULT 1,
            recurring INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE UNIQUE INDEX IF NOT EXISTS uq_calendar_exception_active_date
          ON calendar_exception(exception_date) WHERE active = 1;

        CREATE TABLE IF NOT EXISTS club (
            club_id TEXT PRIMARY KEY,
            number INTEGER NOT NULL UNIQUE,
            weekday TEXT,
            active INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS child (
            child_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            club_id TEXT REFERENCES club(club_id) ON DELETE SET NULL,
            active INTEGER NOT NULL DEFAULT 1,
            joined_date TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_child_club ON child(club_id);

        CREATE TABLE IF NOT EXISTS pagela (
            pagela_id TEXT PRIMARY KEY,
            child_id TEXT NOT NULL REFERENCES child(child_id) ON DELETE CASCADE,
            year INTEGER NOT NULL,
            week INTEGER NOT NULL,
            reference_date TEXT NOT NULL,
            present INTEGER NOT NULL DEFAULT 0,
            did_meditation INTEGER NOT NULL DEFAULT 0,
            recited_verse INTEGER NOT NULL DEFAULT 0,
            notes TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(child_id, year, week)
        );

        CREATE INDEX IF NOT EXISTS idx_pagela_year_week ON pagela(year, week);
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;
    Ok(())
}
