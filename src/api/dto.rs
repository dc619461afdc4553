// ==========================================
// Club Attendance - API request/response DTOs
// ==========================================
// camelCase JSON; list payloads are paginated here, not in the engine.
// ==========================================

use crate::domain::types::Weekday;
use crate::engine::pagination::Pagination;
use crate::engine::report::{
    AttendanceStats, ClubAlert, ClubChildNotAttending, DateRange, InactiveClubRef, MissingWeek,
    TimelineWeek, WeekPosition, WeekSummary, WeeklyClubAttendance, WeeklySummary,
};
use crate::engine::status::{ClubCheckResult, PeriodRef};
use serde::{Deserialize, Serialize};

/// page/limit pair; absent values use the configured defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }
}

/// check_all_clubs_week response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekReportResponse {
    pub year: i32,
    pub week: u32,
    pub summary: WeekSummary,
    pub clubs: Vec<ClubCheckResult>,
    pub pagination: Pagination,
    pub current_week: Option<WeekPosition>,
    pub inactive_clubs: Vec<InactiveClubRef>,
    pub children_not_attending: Vec<ClubChildNotAttending>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// analyze_club_attendance response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubAttendanceResponse {
    pub club_id: String,
    pub club_number: i32,
    pub weekday: Option<Weekday>,
    pub period: Option<PeriodRef>,
    pub range: Option<DateRange>,
    pub attendance: AttendanceStats,
    pub alerts: Vec<ClubAlert>,
    pub timeline: Vec<TimelineWeek>,
    pub timeline_pagination: Pagination,
    pub missing_weeks: Vec<MissingWeek>,
    pub missing_weeks_pagination: Pagination,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// analyze_weekly_attendance response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAnalysisResponse {
    pub year: i32,
    pub week: u32,
    pub week_range: DateRange,
    pub clubs: Vec<WeeklyClubAttendance>,
    pub pagination: Pagination,
    pub summary: WeeklySummary,
}
