// ==========================================
// Club Attendance - calendar exception model
// ==========================================
// A single globally suspended date (holiday, event, ...).
// Only clubs meeting on that weekday are affected.
// ==========================================

use crate::domain::types::ExceptionType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarException {
    pub id: String,
    pub date: NaiveDate,
    pub reason: String,
    #[serde(rename = "type")]
    pub exception_type: ExceptionType,
    pub active: bool,
    /// Informational only: the date is never re-applied to later years
    pub recurring: bool,
}
