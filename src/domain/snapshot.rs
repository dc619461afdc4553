// ==========================================
// Club Attendance - year snapshot
// ==========================================
// Everything one report invocation reads, loaded in a single
// transaction so every club is classified against the same data.
// ==========================================

use crate::domain::calendar_exception::CalendarException;
use crate::domain::club::{Child, Club};
use crate::domain::pagela::Pagela;
use crate::domain::period::AcademicPeriod;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct AttendanceSnapshot {
    pub year: i32,
    /// Active period of `year`, if one is registered
    pub period: Option<AcademicPeriod>,
    pub exceptions: Vec<CalendarException>,
    pub clubs: Vec<Club>,
    pub children: Vec<Child>,
    /// Pagelas of `year`
    pub pagelas: Vec<Pagela>,
}

impl AttendanceSnapshot {
    pub fn find_club(&self, club_id: &str) -> Option<&Club> {
        self.clubs.iter().find(|c| c.id == club_id)
    }

    /// Children grouped by club id; children without a club are skipped
    pub fn children_by_club(&self) -> HashMap<String, Vec<Child>> {
        let mut grouped: HashMap<String, Vec<Child>> = HashMap::new();
        for child in &self.children {
            if let Some(club_id) = &child.club_id {
                grouped.entry(club_id.clone()).or_default().push(child.clone());
            }
        }
        grouped
    }

    /// Pagelas grouped by the club of their child
    pub fn pagelas_by_club(&self) -> HashMap<String, Vec<Pagela>> {
        let club_of: HashMap<&str, &str> = self
            .children
            .iter()
            .filter_map(|c| c.club_id.as_deref().map(|club| (c.id.as_str(), club)))
            .collect();

        let mut grouped: HashMap<String, Vec<Pagela>> = HashMap::new();
        for pagela in &self.pagelas {
            if let Some(club_id) = club_of.get(pagela.child_id.as_str()) {
                grouped
                    .entry((*club_id).to_string())
                    .or_default()
                    .push(pagela.clone());
            }
        }
        grouped
    }
}
