// ==========================================
// Integration test helpers
// ==========================================
// Temp database creation and reference-data seeding
// ==========================================

#![allow(dead_code)]

use club_attendance::db::{init_schema, open_sqlite_connection};
use rusqlite::{params, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

/// Create a temp database file with the schema applied
///
/// # Returns
/// - (NamedTempFile, db_path): keep the file alive for the whole test
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("temp path is not valid UTF-8")?
        .to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// Open an extra connection on a test database
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(open_sqlite_connection(db_path)?)
}

/// Insert or replace one global config value
pub fn insert_test_config(conn: &Connection, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        INSERT OR REPLACE INTO config_kv (scope_id, key, value, updated_at)
        VALUES ('global', ?1, ?2, datetime('now'))
        "#,
        params![key, value],
    )?;
    Ok(())
}

/// Insert a club row bypassing the repository (free-text weekday)
pub fn insert_raw_club(
    conn: &Connection,
    club_id: &str,
    number: i32,
    weekday: Option<&str>,
    active: bool,
) -> Result<(), Box<dyn Error>> {
    conn.execute(
        "INSERT INTO club (club_id, number, weekday, active) VALUES (?1, ?2, ?3, ?4)",
        params![club_id, number, weekday, active],
    )?;
    Ok(())
}
