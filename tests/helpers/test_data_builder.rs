// ==========================================
// Test data builders
// ==========================================
// Fluent builders for reference data used by integration tests
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use club_attendance::domain::types::{ExceptionType, Weekday};
use club_attendance::domain::{AcademicPeriod, Child, Club, NewPagela};
use club_attendance::repository::NewCalendarException;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// AcademicPeriodBuilder
// ==========================================
pub struct AcademicPeriodBuilder {
    year: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    active: bool,
    description: Option<String>,
}

impl AcademicPeriodBuilder {
    /// Defaults: first Monday of February to the last Friday of November
    pub fn new(year: i32) -> Self {
        Self {
            year,
            start_date: date(year, 2, 5),
            end_date: date(year, 11, 29),
            active: true,
            description: None,
        }
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn build(self) -> AcademicPeriod {
        AcademicPeriod {
            year: self.year,
            start_date: self.start_date,
            end_date: self.end_date,
            active: self.active,
            description: self.description,
        }
    }
}

// ==========================================
// ClubBuilder
// ==========================================
pub struct ClubBuilder {
    id: String,
    number: i32,
    weekday: Option<Weekday>,
    active: bool,
}

impl ClubBuilder {
    pub fn new(id: &str, number: i32) -> Self {
        Self {
            id: id.to_string(),
            number,
            weekday: Some(Weekday::Saturday),
            active: true,
        }
    }

    pub fn weekday(mut self, weekday: Weekday) -> Self {
        self.weekday = Some(weekday);
        self
    }

    pub fn no_weekday(mut self) -> Self {
        self.weekday = None;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn build(self) -> Club {
        Club {
            id: self.id,
            number: self.number,
            weekday: self.weekday,
            active: self.active,
        }
    }
}

// ==========================================
// ChildBuilder
// ==========================================
pub struct ChildBuilder {
    id: String,
    name: String,
    club_id: Option<String>,
    active: bool,
    joined_date: Option<NaiveDate>,
}

impl ChildBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: format!("Child {}", id),
            club_id: None,
            active: true,
            joined_date: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn club(mut self, club_id: &str) -> Self {
        self.club_id = Some(club_id.to_string());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn joined(mut self, joined_date: NaiveDate) -> Self {
        self.joined_date = Some(joined_date);
        self
    }

    pub fn build(self) -> Child {
        Child {
            id: self.id,
            name: self.name,
            club_id: self.club_id,
            active: self.active,
            joined_date: self.joined_date,
        }
    }
}

// ==========================================
// PagelaBuilder
// ==========================================
pub struct PagelaBuilder {
    child_id: String,
    reference_date: NaiveDate,
    year: Option<i32>,
    week: Option<u32>,
    present: bool,
    notes: Option<String>,
}

impl PagelaBuilder {
    /// Year and week are derived from `reference_date` unless set
    pub fn new(child_id: &str, reference_date: NaiveDate) -> Self {
        Self {
            child_id: child_id.to_string(),
            reference_date,
            year: None,
            week: None,
            present: true,
            notes: None,
        }
    }

    pub fn academic_week(mut self, year: i32, week: u32) -> Self {
        self.year = Some(year);
        self.week = Some(week);
        self
    }

    pub fn absent(mut self) -> Self {
        self.present = false;
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }

    pub fn build(self) -> NewPagela {
        NewPagela {
            child_id: self.child_id,
            reference_date: self.reference_date,
            year: self.year,
            week: self.week,
            present: self.present,
            did_meditation: self.present,
            recited_verse: false,
            notes: self.notes,
        }
    }
}

// ==========================================
// ExceptionBuilder
// ==========================================
pub struct ExceptionBuilder {
    date: NaiveDate,
    reason: String,
    exception_type: ExceptionType,
    recurring: bool,
}

impl ExceptionBuilder {
    pub fn new(date: NaiveDate, reason: &str) -> Self {
        Self {
            date,
            reason: reason.to_string(),
            exception_type: ExceptionType::Holiday,
            recurring: false,
        }
    }

    pub fn exception_type(mut self, exception_type: ExceptionType) -> Self {
        self.exception_type = exception_type;
        self
    }

    pub fn recurring(mut self) -> Self {
        self.recurring = true;
        self
    }

    pub fn build(self) -> NewCalendarException {
        NewCalendarException {
            date: self.date,
            reason: self.reason,
            exception_type: self.exception_type,
            recurring: self.recurring,
        }
    }
}
