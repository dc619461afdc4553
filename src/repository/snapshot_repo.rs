// ==========================================
// Club Attendance - snapshot repository
// ==========================================
// Loads everything a report needs for one year inside a single read
// transaction, so concurrent edits cannot mix into one report.
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::period::AcademicPeriod;
use crate::domain::snapshot::AttendanceSnapshot;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{club_repo, exception_repo, pagela_repo, period_repo};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub struct SnapshotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SnapshotRepository {
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

    /// Active periods, for resolving the current academic week
    pub fn active_periods(&self) -> RepositoryResult<Vec<AcademicPeriod>> {
        let conn = self.get_conn()?;
        period_repo::query_active(&conn)
    }

    /// Period, active exceptions, clubs, club children and pagelas of `year`
    pub fn load_year(&self, year: i32) -> RepositoryResult<AttendanceSnapshot> {
        let conn = self.get_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        let snapshot = AttendanceSnapshot {
            year,
            period: period_repo::query_active_by_year(&tx, year)?,
            exceptions: exception_repo::query_active(&tx)?,
            clubs: club_repo::query_clubs(&tx)?,
            children: club_repo::query_club_children(&tx)?,
            pagelas: pagela_repo::query_by_year(&tx, year)?,
        };

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        debug!(
            year,
            has_period = snapshot.period.is_some(),
            exceptions = snapshot.exceptions.len(),
            clubs = snapshot.clubs.len(),
            children = snapshot.children.len(),
            pagelas = snapshot.pagelas.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }
}
