// ==========================================
// Club Attendance - domain type definitions
// ==========================================
// Status, severity and calendar enums shared by every layer.
// Serialized as snake_case (same strings as the database columns).
// ==========================================

use crate::domain::error::CalendarError;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

// ==========================================
// Weekday
// ==========================================
// Day on which a club meets. Unknown strings are an invariant violation,
// never silently defaulted: a wrong weekday shifts every expected date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Parse a stored weekday string.
    ///
    /// Accepts English names and the Portuguese names used by the club
    /// registration forms ("quarta", "quarta-feira"), case-insensitive.
    ///
    /// # Errors
    /// - `CalendarError::InvalidWeekday` for anything else
    pub fn parse(s: &str) -> Result<Self, CalendarError> {
        let normalized = s.trim().to_lowercase();
        let day = match normalized.as_str() {
            "monday" | "segunda" | "segunda-feira" => Weekday::Monday,
            "tuesday" | "terca" | "terça" | "terca-feira" | "terça-feira" => Weekday::Tuesday,
            "wednesday" | "quarta" | "quarta-feira" => Weekday::Wednesday,
            "thursday" | "quinta" | "quinta-feira" => Weekday::Thursday,
            "friday" | "sexta" | "sexta-feira" => Weekday::Friday,
            "saturday" | "sabado" | "sábado" => Weekday::Saturday,
            "sunday" | "domingo" => Weekday::Sunday,
            _ => return Err(CalendarError::InvalidWeekday(s.to_string())),
        };
        Ok(day)
    }

    /// Days after Monday (Monday = 0 .. Sunday = 6)
    pub fn days_from_monday(&self) -> u32 {
        match self {
            Weekday::Monday => 0,
            Weekday::Tuesday => 1,
            Weekday::Wednesday => 2,
            Weekday::Thursday => 3,
            Weekday::Friday => 4,
            Weekday::Saturday => 5,
            Weekday::Sunday => 6,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Exception type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExceptionType {
    Holiday,
    Event,
    Maintenance,
    Vacation,
    Other,
}

impl ExceptionType {
    /// Parse a stored type; unknown values fall back to `Other` with a warning
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "holiday" => ExceptionType::Holiday,
            "event" => ExceptionType::Event,
            "maintenance" => ExceptionType::Maintenance,
            "vacation" => ExceptionType::Vacation,
            "other" => ExceptionType::Other,
            unknown => {
                warn!(exception_type = unknown, "unknown exception type, using other");
                ExceptionType::Other
            }
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            ExceptionType::Holiday => "holiday",
            ExceptionType::Event => "event",
            ExceptionType::Maintenance => "maintenance",
            ExceptionType::Vacation => "vacation",
            ExceptionType::Other => "other",
        }
    }
}

impl fmt::Display for ExceptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// Club week status
// ==========================================
// Declaration order is the report sort order: most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceStatus {
    Missing,
    Partial,
    Exception,
    Inactive,
    OutOfPeriod,
    Pending,
    Ok,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 7] = [
        AttendanceStatus::Missing,
        AttendanceStatus::Partial,
        AttendanceStatus::Exception,
        AttendanceStatus::Inactive,
        AttendanceStatus::OutOfPeriod,
        AttendanceStatus::Pending,
        AttendanceStatus::Ok,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Missing => "missing",
            AttendanceStatus::Partial => "partial",
            AttendanceStatus::Exception => "exception",
            AttendanceStatus::Inactive => "inactive",
            AttendanceStatus::OutOfPeriod => "out_of_period",
            AttendanceStatus::Pending => "pending",
            AttendanceStatus::Ok => "ok",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Indicator severity
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Info,
    Success,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Indicator type
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorType {
    NoPagela,
    NoChildren,
    PagelaIncomplete,
    AllPagelas,
    ChildrenNotAttending,
    Exception,
    NoWeekday,
    ClubInactive,
}

impl IndicatorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorType::NoPagela => "no_pagela",
            IndicatorType::NoChildren => "no_children",
            IndicatorType::PagelaIncomplete => "pagela_incomplete",
            IndicatorType::AllPagelas => "all_pagelas",
            IndicatorType::ChildrenNotAttending => "children_not_attending",
            IndicatorType::Exception => "exception",
            IndicatorType::NoWeekday => "no_weekday",
            IndicatorType::ClubInactive => "club_inactive",
        }
    }
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// Urgency of a partial week
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    Medium,
    High,
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Low => write!(f, "low"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::High => write!(f, "high"),
        }
    }
}
