// ==========================================
// Club Attendance - club and child models
// ==========================================

use crate::domain::types::Weekday;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Club
// ==========================================
// weekday = None: unscheduled, never produces expected attendance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: String,
    pub number: i32,
    pub weekday: Option<Weekday>,
    pub active: bool,
}

// ==========================================
// Child
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub club_id: Option<String>,
    pub active: bool,
    pub joined_date: Option<NaiveDate>,
}

impl Child {
    /// Whether the child counts toward expectations on `target`.
    ///
    /// Active and joined on/before the target date (no join date = always).
    pub fn is_eligible_on(&self, target: NaiveDate) -> bool {
        self.active && self.joined_date.map_or(true, |joined| joined <= target)
    }
}
