// ==========================================
// Club Attendance - repository layer
// ==========================================
// Data access over SQLite. No attendance rules here.
// All queries are parameterized.
// ==========================================

pub mod club_repo;
pub mod error;
pub mod exception_repo;
pub mod pagela_repo;
pub mod period_repo;
pub mod snapshot_repo;

pub use club_repo::ClubRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use exception_repo::{CalendarExceptionRepository, NewCalendarException};
pub use pagela_repo::PagelaRepository;
pub use period_repo::AcademicPeriodRepository;
pub use snapshot_repo::SnapshotRepository;
