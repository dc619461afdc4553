// ==========================================
// Club Attendance - core library
// ==========================================
// Weekly children's-club attendance ("pagela") tracking against a
// per-year academic calendar.
// Stack: Rust + SQLite
// ==========================================

// Message catalogs
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// Modules
// ==========================================

// Domain layer - entities and types
pub mod domain;

// Repository layer - data access
pub mod repository;

// Engine layer - calendar and attendance rules
pub mod engine;

// Config layer
pub mod config;

// Database bootstrap (connection PRAGMAs, schema)
pub mod db;

// Logging
pub mod logging;

// Localization
pub mod i18n;

// API layer
pub mod api;

// Application wiring
pub mod app;

// ==========================================
// Re-exports
// ==========================================

pub use domain::types::{AttendanceStatus, ExceptionType, IndicatorType, Severity, Urgency, Weekday};

pub use domain::{
    AcademicPeriod, AttendanceSnapshot, CalendarError, CalendarException, Child, Club, NewPagela,
    Pagela,
};

pub use engine::{
    AcademicCalendar, AttendanceStatusEngine, ChildEligibility, Clock, ExceptionRegistry,
    FixedClock, ReportAggregator, SystemClock,
};

pub use api::{ApiError, AttendanceApi};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Club Attendance";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
