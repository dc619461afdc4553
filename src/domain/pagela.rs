// ==========================================
// Club Attendance - pagela (attendance record) model
// ==========================================
// One record per (child, year, week). Read-only for the engine.
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagela {
    pub id: String,
    pub child_id: String,
    pub year: i32,
    pub week: u32,
    pub reference_date: NaiveDate,
    pub present: bool,
    pub did_meditation: bool,
    pub recited_verse: bool,
    pub notes: Option<String>,
}

/// Input for creating a pagela.
///
/// `year`/`week` are normally derived from `reference_date`; when supplied
/// they must agree with the calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPagela {
    pub child_id: String,
    pub reference_date: NaiveDate,
    pub year: Option<i32>,
    pub week: Option<u32>,
    pub present: bool,
    pub did_meditation: bool,
    pub recited_verse: bool,
    pub notes: Option<String>,
}
