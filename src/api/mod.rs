// ==========================================
// Club Attendance - API layer
// ==========================================
// Business entry points consumed by the admin backend and the CLI.
// ==========================================

pub mod attendance_api;
pub mod dto;
pub mod error;

pub use attendance_api::AttendanceApi;
pub use dto::{ClubAttendanceResponse, PageRequest, WeekReportResponse, WeeklyAnalysisResponse};
pub use error::{ApiError, ApiResult};
