// ==========================================
// Club Attendance - academic calendar
// ==========================================
// Date <-> academic week conversion relative to a period start.
// Weeks run Monday..Sunday; week 1 is the week containing start_date.
// Stateless, no I/O.
// ==========================================

use crate::domain::error::CalendarError;
use crate::domain::period::AcademicPeriod;
use crate::domain::types::Weekday;
use chrono::{Datelike, Duration, NaiveDate};

// ==========================================
// AcademicCalendar - pure functions
// ==========================================
pub struct AcademicCalendar;

impl AcademicCalendar {
    /// Monday on or before `date`
    pub fn week_start(date: NaiveDate) -> NaiveDate {
        date - Duration::days(date.weekday().num_days_from_monday() as i64)
    }

    /// Whole weeks between the week of `start` and the week of `date`
    fn week_offset(start: NaiveDate, date: NaiveDate) -> i64 {
        let days = Self::week_start(date)
            .signed_duration_since(Self::week_start(start))
            .num_days();
        days.div_euclid(7)
    }

    /// Academic week of `date` inside `period` (1-based).
    ///
    /// # Errors
    /// - `DateOutOfPeriod` when `date` is outside `[start_date, end_date]`
    pub fn academic_week(period: &AcademicPeriod, date: NaiveDate) -> Result<u32, CalendarError> {
        if !period.contains(date) {
            return Err(CalendarError::DateOutOfPeriod {
                year: period.year,
                date,
                start: period.start_date,
                end: period.end_date,
            });
        }
        let offset = Self::week_offset(period.start_date, date);
        Ok((offset + 1).max(1) as u32)
    }

    /// Number of academic weeks in the period
    pub fn max_week(period: &AcademicPeriod) -> u32 {
        let offset = Self::week_offset(period.start_date, period.end_date);
        (offset + 1).max(1) as u32
    }

    /// Date on which a club meeting on `weekday` is expected in `week`.
    ///
    /// Starts from the Monday of the period's first week, advances
    /// `(week - 1) * 7` days, then moves forward (never backward) to
    /// `weekday`. The result can fall before `start_date` or after
    /// `end_date`; callers decide what that means.
    ///
    /// # Errors
    /// - `WeekOutOfPeriod` when `week` is 0 or above `max_week`
    pub fn expected_date(
        period: &AcademicPeriod,
        week: u32,
        weekday: Weekday,
    ) -> Result<NaiveDate, CalendarError> {
        let (monday, _) = Self::week_range(period, week)?;
        Ok(monday + Duration::days(weekday.days_from_monday() as i64))
    }

    /// Same as `expected_date`, for a weekday still in its stored string form.
    ///
    /// # Errors
    /// - `InvalidWeekday` for an unrecognized weekday
    /// - `WeekOutOfPeriod` as in `expected_date`
    pub fn expected_date_for(
        period: &AcademicPeriod,
        week: u32,
        weekday: &str,
    ) -> Result<NaiveDate, CalendarError> {
        let weekday = Weekday::parse(weekday)?;
        Self::expected_date(period, week, weekday)
    }

    /// Monday and Sunday of an academic week
    pub fn week_range(
        period: &AcademicPeriod,
        week: u32,
    ) -> Result<(NaiveDate, NaiveDate), CalendarError> {
        let max_week = Self::max_week(period);
        if week == 0 || week > max_week {
            return Err(CalendarError::WeekOutOfPeriod {
                year: period.year,
                week,
                max_week,
            });
        }
        let monday =
            Self::week_start(period.start_date) + Duration::days(((week - 1) as i64) * 7);
        Ok((monday, monday + Duration::days(6)))
    }

    /// Academic week containing `today`, if today is inside the period
    pub fn current_week(period: &AcademicPeriod, today: NaiveDate) -> Option<u32> {
        Self::academic_week(period, today).ok()
    }

    /// Find the period covering `date` and its academic week.
    ///
    /// Periods may cross calendar-year boundaries, so the lookup tries the
    /// date's own year, then the previous year, then the next one.
    /// Inactive periods are ignored.
    pub fn locate<'a>(
        periods: &'a [AcademicPeriod],
        date: NaiveDate,
    ) -> Option<(&'a AcademicPeriod, u32)> {
        let year = date.year();
        [year, year - 1, year + 1].iter().find_map(|candidate| {
            periods
                .iter()
                .filter(|p| p.active && p.year == *candidate)
                .find_map(|p| Self::academic_week(p, date).ok().map(|week| (p, week)))
        })
    }

    /// Academic weeks touched by `[from, to]`, clamped to the period
    pub fn weeks_between(period: &AcademicPeriod, from: NaiveDate, to: NaiveDate) -> Vec<u32> {
        let from = from.max(period.start_date);
        let to = to.min(period.end_date);
        if from > to {
            return Vec::new();
        }
        match (Self::academic_week(period, from), Self::academic_week(period, to)) {
            (Ok(first), Ok(last)) => (first..=last).collect(),
            _ => Vec::new(),
        }
    }
}
