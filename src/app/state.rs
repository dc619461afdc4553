// ==========================================
// Club Attendance - application state
// ==========================================
// Owns the shared connection, the repositories, the config manager and
// the attendance API.
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::AttendanceApi;
use crate::config::config_manager::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection};
use crate::engine::clock::{Clock, SystemClock};
use crate::repository::{
    AcademicPeriodRepository, CalendarExceptionRepository, ClubRepository, PagelaRepository,
    SnapshotRepository,
};

/// Application state
///
/// Every repository shares one connection, so a snapshot read never
/// interleaves with a write from the same process.
pub struct AppState {
    pub db_path: String,

    pub attendance_api: Arc<AttendanceApi>,

    /// Reference data maintenance
    pub period_repo: Arc<AcademicPeriodRepository>,
    pub exception_repo: Arc<CalendarExceptionRepository>,
    pub club_repo: Arc<ClubRepository>,
    pub pagela_repo: Arc<PagelaRepository>,

    pub config_manager: Arc<ConfigManager>,
}

impl AppState {
    /// Build the state on the wall clock
    ///
    /// # Arguments
    /// - db_path: database file path (created when missing)
    pub fn new(db_path: String) -> Result<Self, String> {
        Self::with_clock(db_path, Arc::new(SystemClock))
    }

    /// Build the state with an injected clock
    pub fn with_clock(db_path: String, clock: Arc<dyn Clock>) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "initializing AppState");

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("cannot open database: {}", e))?;
        init_schema(&conn).map_err(|e| format!("cannot initialize schema: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // Repositories
        // ==========================================
        let period_repo = Arc::new(AcademicPeriodRepository::from_connection(conn.clone()));
        let exception_repo = Arc::new(CalendarExceptionRepository::from_connection(conn.clone()));
        let club_repo = Arc::new(ClubRepository::from_connection(conn.clone()));
        let pagela_repo = Arc::new(PagelaRepository::from_connection(conn.clone()));
        let snapshot_repo = Arc::new(SnapshotRepository::from_connection(conn.clone()));

        // ==========================================
        // Config
        // ==========================================
        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("cannot create ConfigManager: {}", e))?,
        );

        // ==========================================
        // API
        // ==========================================
        let attendance_api = Arc::new(AttendanceApi::new(
            snapshot_repo,
            config_manager.clone(),
            clock,
        ));

        tracing::info!("AppState ready");

        Ok(Self {
            db_path,
            attendance_api,
            period_repo,
            exception_repo,
            club_repo,
            pagela_repo,
            config_manager,
        })
    }
}

/// Default database path
///
/// 1. `CLUB_ATTENDANCE_DB_PATH` when set and non-empty
/// 2. `<user data dir>/club-attendance[-dev]/club_attendance.db`
/// 3. `./club_attendance.db`
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var("CLUB_ATTENDANCE_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./club_attendance.db");

    if let Some(data_dir) = dirs::data_dir() {
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("club-attendance-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("club-attendance");
        }

        // best-effort: opening the database reports the real failure
        std::fs::create_dir_all(&path).ok();
        path = path.join("club_attendance.db");
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::FixedClock;
    use chrono::NaiveDate;
    use tempfile::NamedTempFile;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(path.ends_with(".db"));
    }

    #[tokio::test]
    async fn test_state_wires_a_fresh_database() {
        let file = NamedTempFile::new().unwrap();
        let db_path = file.path().to_str().unwrap().to_string();
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));

        let state = AppState::with_clock(db_path, clock).unwrap();
        assert!(state.period_repo.list_active().unwrap().is_empty());
        assert!(state.attendance_api.current_week().await.unwrap().is_none());
    }
}
