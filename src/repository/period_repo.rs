// ==========================================
// Club Attendance - academic period repository
// ==========================================
// Table: academic_period (one row per year)
// Periods are soft-deactivated, never deleted.
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::period::AcademicPeriod;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};
use tracing::info;

const PERIOD_COLUMNS: &str = "year, start_date, end_date, active, description";

fn map_period_row(row: &Row<'_>) -> rusqlite::Result<AcademicPeriod> {
    Ok(AcademicPeriod {
        year: row.get(0)?,
        start_date: row.get(1)?,
        end_date: row.get(2)?,
        active: row.get(3)?,
        description: row.get(4)?,
    })
}

/// Active period of `year`
pub(crate) fn query_active_by_year(
    conn: &Connection,
    year: i32,
) -> RepositoryResult<Option<AcademicPeriod>> {
    let sql = format!(
        "SELECT {} FROM academic_period WHERE year = ?1 AND active = 1",
        PERIOD_COLUMNS
    );
    let period = conn.query_row(&sql, params![year], map_period_row).optional()?;
    Ok(period)
}

pub(crate) fn query_active(conn: &Connection) -> RepositoryResult<Vec<AcademicPeriod>> {
    let sql = format!(
        "SELECT {} FROM academic_period WHERE active = 1 ORDER BY year",
        PERIOD_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let periods = stmt
        .query_map([], map_period_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(periods)
}

pub struct AcademicPeriodRepository {
    conn: Arc<Mutex<Connection>>,
}

impl AcademicPeriodRepository {
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

    /// Period of `year`, active or not
    pub fn find_by_year(&self, year: i32) -> RepositoryResult<Option<AcademicPeriod>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM academic_period WHERE year = ?1", PERIOD_COLUMNS);
        let period = conn.query_row(&sql, params![year], map_period_row).optional()?;
        Ok(period)
    }

    pub fn find_active_by_year(&self, year: i32) -> RepositoryResult<Option<AcademicPeriod>> {
        let conn = self.get_conn()?;
        query_active_by_year(&conn, year)
    }

    /// Active periods, oldest first
    pub fn list_active(&self) -> RepositoryResult<Vec<AcademicPeriod>> {
        let conn = self.get_conn()?;
        query_active(&conn)
    }

    /// Insert or replace the period of `period.year`.
    ///
    /// # Errors
    /// - `ValidationError` when start_date > end_date
    pub fn upsert(&self, period: &AcademicPeriod) -> RepositoryResult<()> {
        period.validate()?;
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO academic_period (year, start_date, end_date, active, description, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, datetime('now'))
            ON CONFLICT(year) DO UPDATE SET
                start_date = excluded.start_date,
                end_date = excluded.end_date,
                active = excluded.active,
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
            params![
                period.year,
                period.start_date,
                period.end_date,
                period.active,
                period.description,
            ],
        )?;
        info!(year = period.year, start = %period.start_date, end = %period.end_date, "academic period saved");
        Ok(())
    }

    /// Soft-deactivate the period of `year`
    pub fn deactivate(&self, year: i32) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            "UPDATE academic_period SET active = 0, updated_at = datetime('now') WHERE year = ?1",
            params![year],
        )?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "AcademicPeriod".to_string(),
                id: year.to_string(),
            });
        }
        info!(year, "academic period deactivated");
        Ok(())
    }
}
