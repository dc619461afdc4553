// ==========================================
// Club Attendance - domain layer
// ==========================================
// Entities, enums and calendar errors.
// No data access, no engine logic.
// ==========================================

pub mod calendar_exception;
pub mod club;
pub mod error;
pub mod pagela;
pub mod period;
pub mod snapshot;
pub mod types;

pub use calendar_exception::CalendarException;
pub use club::{Child, Club};
pub use error::CalendarError;
pub use pagela::{NewPagela, Pagela};
pub use period::AcademicPeriod;
pub use snapshot::AttendanceSnapshot;
pub use types::{AttendanceStatus, ExceptionType, IndicatorType, Severity, Urgency, Weekday};
