// ==========================================
// Club Attendance - academic period model
// ==========================================
// One period per calendar year, shared by every club.
// Soft-deactivated only, so old reports stay reproducible.
// ==========================================

use crate::domain::error::CalendarError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// AcademicPeriod
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicPeriod {
    pub year: i32,                   // unique
    pub start_date: NaiveDate,       // week 1 starts on the Monday on/before this date
    pub end_date: NaiveDate,
    pub active: bool,
    pub description: Option<String>,
}

impl AcademicPeriod {
    /// Build a period, checking `start_date <= end_date`
    pub fn new(
        year: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        description: Option<String>,
    ) -> Result<Self, CalendarError> {
        let period = Self {
            year,
            start_date,
            end_date,
            active: true,
            description,
        };
        period.validate()?;
        Ok(period)
    }

    pub fn validate(&self) -> Result<(), CalendarError> {
        if self.start_date > self.end_date {
            return Err(CalendarError::InvalidPeriod {
                year: self.year,
                start: self.start_date,
                end: self.end_date,
            });
        }
        Ok(())
    }

    /// Whether `date` lies inside `[start_date, end_date]`
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
