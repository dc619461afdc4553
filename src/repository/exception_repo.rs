// ==========================================
// Club Attendance - calendar exception repository
// ==========================================
// Table: calendar_exception
// At most one active exception per date (partial unique index).
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::calendar_exception::CalendarException;
use crate::domain::types::ExceptionType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

const EXCEPTION_COLUMNS: &str =
    "exception_id, exception_date, reason, exception_type, active, recurring";

fn map_exception_row(row: &Row<'_>) -> rusqlite::Result<CalendarException> {
    let exception_type: String = row.get(3)?;
    Ok(CalendarException {
        id: row.get(0)?,
        date: row.get(1)?,
        reason: row.get(2)?,
        exception_type: ExceptionType::parse(&exception_type),
        active: row.get(4)?,
        recurring: row.get(5)?,
    })
}

pub(crate) fn query_active(conn: &Connection) -> RepositoryResult<Vec<CalendarException>> {
    let sql = format!(
        "SELECT {} FROM calendar_exception WHERE active = 1 ORDER BY exception_date",
        EXCEPTION_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let exceptions = stmt
        .query_map([], map_exception_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(exceptions)
}

/// Input for registering an exception
#[derive(Debug, Clone)]
pub struct NewCalendarException {
    pub date: NaiveDate,
    pub reason: String,
    pub exception_type: ExceptionType,
    pub recurring: bool,
}

pub struct CalendarExceptionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CalendarExceptionRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn list_active(&self) -> RepositoryResult<Vec<CalendarException>> {
        let conn = self.get_conn()?;
        query_active(&conn)
    }

    pub fn find_active_by_date(&self, date: NaiveDate) -> RepositoryResult<Option<CalendarException>> {
        let conn = self.get_conn()?;
        let sql = format!(
            "SELECT {} FROM calendar_exception WHERE exception_date = ?1 AND active = 1",
            EXCEPTION_COLUMNS
        );
        let exception = conn.query_row(&sql, params![date], map_exception_row).optional()?;
        Ok(exception)
    }

    /// Register an exception.
    ///
    /// # Errors
    /// - `UniqueConstraintViolation` when the date already has an active exception
    pub fn insert(&self, input: NewCalendarException) -> RepositoryResult<CalendarException> {
        let exception = CalendarException {
            id: Uuid::new_v4().to_string(),
            date: input.date,
            reason: input.reason,
            exception_type: input.exception_type,
            active: true,
            recurring: input.recurring,
        };

        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO calendar_exception
                (exception_id, exception_date, reason, exception_type, active, recurring)
            VALUES (?1, ?2, ?3, ?4, 1, ?5)
            "#,
            params![
                exception.id,
                exception.date,
                exception.reason,
                exception.exception_type.to_db_str(),
                exception.recurring,
            ],
        )?;
        info!(id = %exception.id, date = %exception.date, kind = %exception.exception_type, "calendar exception registered");
        Ok(exception)
    }

    pub fn deactivate(&self, id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            "UPDATE calendar_exception SET active = 0 WHERE exception_id = ?1",
            params![id],
        )?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "CalendarException".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
