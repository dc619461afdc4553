// ==========================================
// Club Attendance - exception registry
// ==========================================
// Read-only lookup of globally suspended dates, built once per report
// invocation from the snapshot. No recurrence expansion: a "recurring"
// exception only covers the date it was stored with.
// ==========================================

use crate::domain::calendar_exception::CalendarException;
use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Default)]
pub struct ExceptionRegistry {
    by_date: HashMap<NaiveDate, CalendarException>,
}

impl ExceptionRegistry {
    /// Build the registry from stored exceptions.
    ///
    /// Inactive exceptions are dropped. When two active exceptions share a
    /// date (the table's unique index should prevent it) the first one wins.
    pub fn from_exceptions(exceptions: impl IntoIterator<Item = CalendarException>) -> Self {
        let mut by_date: HashMap<NaiveDate, CalendarException> = HashMap::new();
        for exception in exceptions.into_iter().filter(|e| e.active) {
            if let Some(existing) = by_date.get(&exception.date) {
                warn!(
                    date = %exception.date,
                    kept = %existing.id,
                    dropped = %exception.id,
                    "duplicate active exception for date"
                );
                continue;
            }
            by_date.insert(exception.date, exception);
        }
        Self { by_date }
    }

    pub fn lookup(&self, date: NaiveDate) -> Option<&CalendarException> {
        self.by_date.get(&date)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }
}
