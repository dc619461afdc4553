// ==========================================
// Club Attendance - calendar error types
// ==========================================
// Tool: thiserror derive
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// Errors raised by calendar arithmetic.
///
/// `InvalidWeekday` is a data/programming error and must reach the caller.
/// `WeekOutOfPeriod` / `DateOutOfPeriod` are expected outcomes that the
/// status engine turns into an `out_of_period` result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("unrecognized weekday: {0:?}")]
    InvalidWeekday(String),

    #[error("week {week} is outside period {year} (1..={max_week})")]
    WeekOutOfPeriod { year: i32, week: u32, max_week: u32 },

    #[error("date {date} is outside period {year} ({start}..={end})")]
    DateOutOfPeriod {
        year: i32,
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid period {year}: start {start} is after end {end}")]
    InvalidPeriod {
        year: i32,
        start: NaiveDate,
        end: NaiveDate,
    },
}
