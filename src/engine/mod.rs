// ==========================================
// Club Attendance - engine layer
// ==========================================
// Calendar math, eligibility, per-club-week classification and report
// aggregation. Pure functions over a loaded snapshot: no SQL here.
// ==========================================

pub mod calendar;
pub mod clock;
pub mod eligibility;
pub mod exception_registry;
pub mod pagination;
pub mod report;
pub mod status;

pub use calendar::AcademicCalendar;
pub use clock::{Clock, FixedClock, SystemClock};
pub use eligibility::{ChildEligibility, EligibilitySplit};
pub use exception_registry::ExceptionRegistry;
pub use pagination::{paginate, Page, Pagination};
pub use report::{
    AlertThresholds, ClubTimeline, DateRange, DetailedIndicators, ReportAggregator, ReportFilters,
    WeekPosition, WeekReport, WeeklyAnalysis,
};
pub use status::{
    AttendanceStatusEngine, AttendanceThresholds, ClubCheckResult, ClubWeekContext, ClubWeekState,
    Indicator, WeekTiming,
};
