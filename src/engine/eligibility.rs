// ==========================================
// Club Attendance - child eligibility
// ==========================================
// Point-in-time split of a club's children into those counted toward
// expected attendance and those tracked only as "not attending".
// The reference date is the club's expected date for the week, never
// "today", so historical weeks stay stable.
// ==========================================

use crate::domain::club::Child;
use chrono::NaiveDate;

/// Result of an eligibility split
#[derive(Debug, Clone, Default)]
pub struct EligibilitySplit<'a> {
    /// Counted in expectation denominators
    pub active: Vec<&'a Child>,
    /// Inactive (or not yet joined) as of the reference date
    pub excluded_inactive: Vec<&'a Child>,
}

impl<'a> EligibilitySplit<'a> {
    pub fn total(&self) -> usize {
        self.active.len() + self.excluded_inactive.len()
    }
}

pub struct ChildEligibility;

impl ChildEligibility {
    /// Split `children` as of `as_of`.
    ///
    /// # Rule
    /// eligible = active AND (joined_date is null OR joined_date <= as_of)
    pub fn split(children: &[Child], as_of: NaiveDate) -> EligibilitySplit<'_> {
        let (active, excluded_inactive): (Vec<&Child>, Vec<&Child>) =
            children.iter().partition(|child| child.is_eligible_on(as_of));
        EligibilitySplit {
            active,
            excluded_inactive,
        }
    }

    /// Deactivated club: every member is retired, whatever their own flag
    pub fn retire_all(children: &[Child]) -> EligibilitySplit<'_> {
        EligibilitySplit {
            active: Vec::new(),
            excluded_inactive: children.iter().collect(),
        }
    }
}
