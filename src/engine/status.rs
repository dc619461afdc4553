// ==========================================
// Club Attendance - attendance status engine
// ==========================================
// Classifies one club for one academic week and emits indicators.
// Input: club + period + children + the club's pagelas + exceptions + today
// Output: ClubCheckResult (status, child counts, indicators)
// ==========================================
// State precedence (ClubWeekState, evaluated top to bottom):
//   1. OutOfPeriod  2. ClubInactive  3. NoWeekday  4. NoPeriod
//   5. Exception    6. Evaluated(timing)
// ==========================================

use crate::domain::calendar_exception::CalendarException;
use crate::domain::club::{Child, Club};
use crate::domain::error::CalendarError;
use crate::domain::pagela::Pagela;
use crate::domain::period::AcademicPeriod;
use crate::domain::types::{
    AttendanceStatus, ExceptionType, IndicatorType, Severity, Urgency, Weekday,
};
use crate::engine::calendar::AcademicCalendar;
use crate::engine::eligibility::{ChildEligibility, EligibilitySplit};
use crate::engine::exception_registry::ExceptionRegistry;
use crate::i18n::{t, t_with_args};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashSet;
use tracing::{debug, instrument};

// ==========================================
// Thresholds
// ==========================================

/// Missing-rate tiers for partial weeks (percent, strict "greater than")
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttendanceThresholds {
    pub urgency_high_pct: f64,   // default 50
    pub urgency_medium_pct: f64, // default 25
}

impl Default for AttendanceThresholds {
    fn default() -> Self {
        Self {
            urgency_high_pct: 50.0,
            urgency_medium_pct: 25.0,
        }
    }
}

impl AttendanceThresholds {
    pub fn urgency_for(&self, missing_rate_pct: f64) -> Urgency {
        if missing_rate_pct > self.urgency_high_pct {
            Urgency::High
        } else if missing_rate_pct > self.urgency_medium_pct {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }
}

// ==========================================
// Result types
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekRef {
    pub year: i32,
    pub week: u32,
    pub expected_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotAttendingChild {
    pub id: String,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildrenSummary {
    pub total: usize,
    pub active_count: usize,
    pub inactive_count: usize,
    pub with_record: usize,
    pub missing: usize,
    pub missing_list: Vec<ChildRef>,
    pub not_attending_count: usize,
    pub not_attending_list: Vec<NotAttendingChild>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicator {
    #[serde(rename = "type")]
    pub indicator_type: IndicatorType,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionRef {
    pub date: NaiveDate,
    pub reason: String,
    #[serde(rename = "type")]
    pub exception_type: ExceptionType,
}

impl From<&CalendarException> for ExceptionRef {
    fn from(exception: &CalendarException) -> Self {
        Self {
            date: exception.date,
            reason: exception.reason.clone(),
            exception_type: exception.exception_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodRef {
    pub year: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_week: u32,
}

impl From<&AcademicPeriod> for PeriodRef {
    fn from(period: &AcademicPeriod) -> Self {
        Self {
            year: period.year,
            start_date: period.start_date,
            end_date: period.end_date,
            max_week: AcademicCalendar::max_week(period),
        }
    }
}

/// Classification of one club for one academic week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubCheckResult {
    pub club_id: String,
    pub club_number: i32,
    pub weekday: Option<Weekday>,
    pub week: WeekRef,
    pub children: ChildrenSummary,
    pub status: AttendanceStatus,
    pub indicators: Vec<Indicator>,
    pub exception: Option<ExceptionRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<PeriodRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ClubCheckResult {
    /// critical OR warning indicator, or partial/missing status
    pub fn has_problems(&self) -> bool {
        matches!(
            self.status,
            AttendanceStatus::Missing | AttendanceStatus::Partial
        ) || self
            .indicators
            .iter()
            .any(|i| matches!(i.severity, Severity::Critical | Severity::Warning))
    }

    pub fn has_severity(&self, severity: Severity) -> bool {
        self.indicators.iter().any(|i| i.severity == severity)
    }

    pub fn has_indicator(&self, indicator_type: IndicatorType) -> bool {
        self.indicators.iter().any(|i| i.indicator_type == indicator_type)
    }
}

// ==========================================
// State machine
// ==========================================

/// Position of the requested week relative to today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekTiming {
    /// Week after the current academic week (or period not started)
    Future,
    /// Current week, club day not passed yet
    CurrentBeforeClubDay,
    /// Current week after the club day, or any past week
    DayPassed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClubWeekState<'a> {
    OutOfPeriod,
    ClubInactive,
    NoWeekday,
    NoPeriod,
    Exception(&'a CalendarException),
    Evaluated(WeekTiming),
}

/// Everything the engine needs for one (club, week)
#[derive(Debug, Clone, Copy)]
pub struct ClubWeekContext<'a> {
    pub club: &'a Club,
    pub year: i32,
    pub week: u32,
    pub period: Option<&'a AcademicPeriod>,
    /// Children of the club
    pub children: &'a [Child],
    /// Pagelas of the club's children; other weeks are ignored
    pub pagelas: &'a [Pagela],
    pub exceptions: &'a ExceptionRegistry,
    pub today: NaiveDate,
}

// ==========================================
// AttendanceStatusEngine
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AttendanceStatusEngine {
    thresholds: AttendanceThresholds,
}

impl AttendanceStatusEngine {
    pub fn new(thresholds: AttendanceThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AttendanceThresholds {
        &self.thresholds
    }

    /// Expected meeting date, when period, weekday and week allow one
    fn expected_date(ctx: &ClubWeekContext<'_>) -> Result<Option<NaiveDate>, CalendarError> {
        let (Some(period), Some(weekday)) = (ctx.period, ctx.club.weekday) else {
            return Ok(None);
        };
        if ctx.week == 0 || ctx.week > AcademicCalendar::max_week(period) {
            return Ok(None);
        }
        AcademicCalendar::expected_date(period, ctx.week, weekday).map(Some)
    }

    /// Where the requested week sits relative to today, through the same calendar
    pub fn week_timing(
        period: &AcademicPeriod,
        week: u32,
        expected_date: NaiveDate,
        today: NaiveDate,
    ) -> WeekTiming {
        match AcademicCalendar::current_week(period, today) {
            Some(current) if week > current => WeekTiming::Future,
            Some(current) if week == current && today <= expected_date => {
                WeekTiming::CurrentBeforeClubDay
            }
            Some(_) => WeekTiming::DayPassed,
            None if today < period.start_date => WeekTiming::Future,
            None => WeekTiming::DayPassed,
        }
    }

    /// Resolve the state for a (club, week) in precedence order
    pub fn resolve_state<'a>(
        ctx: &ClubWeekContext<'a>,
        expected_date: Option<NaiveDate>,
    ) -> ClubWeekState<'a> {
        if let Some(period) = ctx.period {
            if ctx.week == 0 || ctx.week > AcademicCalendar::max_week(period) {
                return ClubWeekState::OutOfPeriod;
            }
            if let Some(date) = expected_date {
                if !period.contains(date) {
                    return ClubWeekState::OutOfPeriod;
                }
            }
        }
        if !ctx.club.active {
            return ClubWeekState::ClubInactive;
        }
        if ctx.club.weekday.is_none() {
            return ClubWeekState::NoWeekday;
        }
        let (Some(period), Some(expected)) = (ctx.period, expected_date) else {
            return ClubWeekState::NoPeriod;
        };
        if let Some(exception) = ctx.exceptions.lookup(expected) {
            return ClubWeekState::Exception(exception);
        }
        ClubWeekState::Evaluated(Self::week_timing(period, ctx.week, expected, ctx.today))
    }

    /// Classify one club for one academic week.
    ///
    /// # Errors
    /// Only calendar invariant violations; out-of-range weeks produce an
    /// `out_of_period` result instead.
    #[instrument(skip_all, fields(club_id = %ctx.club.id, year = ctx.year, week = ctx.week))]
    pub fn check_club_week(&self, ctx: &ClubWeekContext<'_>) -> Result<ClubCheckResult, CalendarError> {
        let expected_date = Self::expected_date(ctx)?;
        let state = Self::resolve_state(ctx, expected_date);
        debug!(?state, ?expected_date, "club week state resolved");

        let mut result = ClubCheckResult {
            club_id: ctx.club.id.clone(),
            club_number: ctx.club.number,
            weekday: ctx.club.weekday,
            week: WeekRef {
                year: ctx.year,
                week: ctx.week,
                expected_date,
            },
            children: ChildrenSummary::default(),
            status: AttendanceStatus::Pending,
            indicators: Vec::new(),
            exception: None,
            period: ctx.period.map(PeriodRef::from),
            note: None,
        };

        match state {
            ClubWeekState::OutOfPeriod => {
                result.status = AttendanceStatus::OutOfPeriod;
                result.children.total = ctx.children.len();
            }
            ClubWeekState::ClubInactive => {
                let split = ChildEligibility::retire_all(ctx.children);
                result.status = AttendanceStatus::Inactive;
                result.children = Self::summarize(ctx, &split);
                result.indicators.push(Self::info(
                    IndicatorType::ClubInactive,
                    t("indicator.club_inactive"),
                    json!({ "clubActive": false }),
                ));
                self.push_not_attending(&mut result);
            }
            ClubWeekState::NoWeekday => {
                let as_of = Self::reference_date(ctx);
                let split = ChildEligibility::split(ctx.children, as_of);
                result.status = AttendanceStatus::Inactive;
                result.children = Self::summarize(ctx, &split);
                result.indicators.push(Self::info(
                    IndicatorType::NoWeekday,
                    t("indicator.no_weekday"),
                    json!({ "weekday": null }),
                ));
                self.push_not_attending(&mut result);
            }
            ClubWeekState::NoPeriod => {
                let split = ChildEligibility::split(ctx.children, ctx.today);
                result.status = AttendanceStatus::Ok;
                result.children = Self::summarize(ctx, &split);
                result.note = Some(t_with_args(
                    "note.no_period",
                    &[("year", &ctx.year.to_string())],
                ));
            }
            ClubWeekState::Exception(exception) => {
                let as_of = expected_date.unwrap_or(exception.date);
                let split = ChildEligibility::split(ctx.children, as_of);
                result.status = AttendanceStatus::Exception;
                result.children = Self::summarize(ctx, &split);
                result.exception = Some(ExceptionRef::from(exception));
                result.indicators.push(Self::info(
                    IndicatorType::Exception,
                    t_with_args(
                        "indicator.exception",
                        &[
                            ("reason", &exception.reason),
                            ("date", &exception.date.to_string()),
                        ],
                    ),
                    json!({
                        "date": exception.date,
                        "reason": exception.reason,
                        "type": exception.exception_type,
                        "attendanceRequired": false,
                    }),
                ));
            }
            ClubWeekState::Evaluated(timing) => {
                let as_of = expected_date.unwrap_or(ctx.today);
                let split = ChildEligibility::split(ctx.children, as_of);
                result.children = Self::summarize(ctx, &split);
                result.status = Self::classify(&result.children, timing);
                self.push_status_indicators(&mut result, timing);
                self.push_not_attending(&mut result);
            }
        }

        Ok(result)
    }

    /// Status from completion and timing
    pub fn classify(children: &ChildrenSummary, timing: WeekTiming) -> AttendanceStatus {
        let total = children.active_count;
        let full = total > 0 && children.with_record >= total;
        let any = children.with_record > 0;

        match timing {
            WeekTiming::Future if full => AttendanceStatus::Ok,
            WeekTiming::Future if any => AttendanceStatus::Partial,
            WeekTiming::Future => AttendanceStatus::Pending,
            WeekTiming::CurrentBeforeClubDay if full => AttendanceStatus::Ok,
            WeekTiming::CurrentBeforeClubDay => AttendanceStatus::Pending,
            WeekTiming::DayPassed if full => AttendanceStatus::Ok,
            WeekTiming::DayPassed if any => AttendanceStatus::Partial,
            WeekTiming::DayPassed => AttendanceStatus::Missing,
        }
    }

    // ==========================================
    // Helpers
    // ==========================================

    /// Eligibility date when no expected date exists
    fn reference_date(ctx: &ClubWeekContext<'_>) -> NaiveDate {
        ctx.period
            .and_then(|p| AcademicCalendar::week_range(p, ctx.week).ok())
            .map(|(monday, _)| monday)
            .unwrap_or(ctx.today)
    }

    fn summarize(ctx: &ClubWeekContext<'_>, split: &EligibilitySplit<'_>) -> ChildrenSummary {
        let recorded: HashSet<&str> = ctx
            .pagelas
            .iter()
            .filter(|p| p.year == ctx.year && p.week == ctx.week)
            .map(|p| p.child_id.as_str())
            .collect();

        let (with_record, without_record): (Vec<&Child>, Vec<&Child>) = split
            .active
            .iter()
            .copied()
            .partition(|child| recorded.contains(child.id.as_str()));

        ChildrenSummary {
            total: ctx.children.len(),
            active_count: split.active.len(),
            inactive_count: split.excluded_inactive.len(),
            with_record: with_record.len(),
            missing: without_record.len(),
            missing_list: without_record
                .iter()
                .map(|c| ChildRef {
                    id: c.id.clone(),
                    name: c.name.clone(),
                })
                .collect(),
            not_attending_count: split.excluded_inactive.len(),
            not_attending_list: split
                .excluded_inactive
                .iter()
                .map(|c| NotAttendingChild {
                    id: c.id.clone(),
                    name: c.name.clone(),
                    active: c.active,
                })
                .collect(),
        }
    }

    fn info(indicator_type: IndicatorType, message: String, details: serde_json::Value) -> Indicator {
        Indicator {
            indicator_type,
            severity: Severity::Info,
            message,
            urgency: None,
            details,
        }
    }

    fn push_status_indicators(&self, result: &mut ClubCheckResult, timing: WeekTiming) {
        let children = &result.children;
        let total = children.active_count;
        let day_passed = timing == WeekTiming::DayPassed;

        let indicator = match result.status {
            AttendanceStatus::Missing if day_passed && total > 0 => Some(Indicator {
                indicator_type: IndicatorType::NoPagela,
                severity: Severity::Critical,
                message: t_with_args(
                    "indicator.no_pagela",
                    &[
                        ("missing", &children.missing.to_string()),
                        ("total", &total.to_string()),
                    ],
                ),
                urgency: None,
                details: json!({
                    "expected": total,
                    "withRecord": 0,
                    "missing": children.missing,
                }),
            }),
            AttendanceStatus::Missing if day_passed => Some(Indicator {
                indicator_type: IndicatorType::NoChildren,
                severity: Severity::Warning,
                message: t("indicator.no_children"),
                urgency: None,
                details: json!({ "eligibleTotal": 0, "totalChildren": children.total }),
            }),
            AttendanceStatus::Partial if day_passed => {
                let missing_rate = if total > 0 {
                    children.missing as f64 / total as f64 * 100.0
                } else {
                    0.0
                };
                let urgency = self.thresholds.urgency_for(missing_rate);
                Some(Indicator {
                    indicator_type: IndicatorType::PagelaIncomplete,
                    severity: Severity::Warning,
                    message: t_with_args(
                        "indicator.pagela_incomplete",
                        &[
                            ("with_record", &children.with_record.to_string()),
                            ("total", &total.to_string()),
                            ("missing", &children.missing.to_string()),
                        ],
                    ),
                    urgency: Some(urgency),
                    details: json!({
                        "expected": total,
                        "withRecord": children.with_record,
                        "missing": children.missing,
                        "missingRate": missing_rate,
                        "urgency": urgency,
                    }),
                })
            }
            AttendanceStatus::Ok if total > 0 => Some(Indicator {
                indicator_type: IndicatorType::AllPagelas,
                severity: Severity::Success,
                message: t_with_args("indicator.all_pagelas", &[("total", &total.to_string())]),
                urgency: None,
                details: json!({ "expected": total, "withRecord": children.with_record }),
            }),
            _ => None,
        };

        if let Some(indicator) = indicator {
            result.indicators.push(indicator);
        }
    }

    /// Orthogonal to the completion indicators; never counted as missing
    fn push_not_attending(&self, result: &mut ClubCheckResult) {
        let children = &result.children;
        if children.not_attending_count == 0 {
            return;
        }
        result.indicators.push(Indicator {
            indicator_type: IndicatorType::ChildrenNotAttending,
            severity: Severity::Warning,
            message: t_with_args(
                "indicator.children_not_attending",
                &[("count", &children.not_attending_count.to_string())],
            ),
            urgency: None,
            details: json!({
                "count": children.not_attending_count,
                "children": children.not_attending_list,
                "note": t("indicator.children_not_attending_note"),
            }),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn period_2024() -> AcademicPeriod {
        AcademicPeriod::new(2024, d(2024, 2, 5), d(2024, 12, 15), None).unwrap()
    }

    fn club(weekday: Option<Weekday>, active: bool) -> Club {
        Club {
            id: "club-7".to_string(),
            number: 7,
            weekday,
            active,
        }
    }

    fn children(n: usize) -> Vec<Child> {
        (1..=n)
            .map(|i| Child {
                id: format!("c{}", i),
                name: format!("Child {}", i),
                club_id: Some("club-7".to_string()),
                active: true,
                joined_date: None,
            })
            .collect()
    }

    fn pagela(child_id: &str, year: i32, week: u32) -> Pagela {
        Pagela {
            id: format!("p-{}-{}", child_id, week),
            child_id: child_id.to_string(),
            year,
            week,
            reference_date: d(2024, 2, 7),
            present: true,
            did_meditation: false,
            recited_verse: false,
            notes: None,
        }
    }

    fn holiday(date: NaiveDate) -> CalendarException {
        CalendarException {
            id: "h1".to_string(),
            date,
            reason: "Feriado".to_string(),
            exception_type: ExceptionType::Holiday,
            active: true,
            recurring: false,
        }
    }

    struct Fixture {
        club: Club,
        period: Option<AcademicPeriod>,
        children: Vec<Child>,
        pagelas: Vec<Pagela>,
        exceptions: ExceptionRegistry,
        today: NaiveDate,
    }

    impl Fixture {
        fn new(club: Club, children: Vec<Child>) -> Self {
            Self {
                club,
                period: Some(period_2024()),
                children,
                pagelas: Vec::new(),
                exceptions: ExceptionRegistry::default(),
                today: d(2024, 3, 1),
            }
        }

        fn check(&self, week: u32) -> ClubCheckResult {
            let ctx = ClubWeekContext {
                club: &self.club,
                year: 2024,
                week,
                period: self.period.as_ref(),
                children: &self.children,
                pagelas: &self.pagelas,
                exceptions: &self.exceptions,
                today: self.today,
            };
            AttendanceStatusEngine::default().check_club_week(&ctx).unwrap()
        }
    }

    #[test]
    fn test_missing_week_is_critical() {
        let fx = Fixture::new(club(Some(Weekday::Wednesday), true), children(3));
        let result = fx.check(1);

        assert_eq!(result.status, AttendanceStatus::Missing);
        assert_eq!(result.week.expected_date, Some(d(2024, 2, 7)));
        assert_eq!(result.children.missing, 3);
        assert_eq!(result.indicators.len(), 1);
        assert_eq!(result.indicators[0].indicator_type, IndicatorType::NoPagela);
        assert_eq!(result.indicators[0].severity, Severity::Critical);
        assert!(result.has_problems());
    }

    #[test]
    fn test_week_beyond_period_is_out_of_period() {
        let fx = Fixture::new(club(Some(Weekday::Wednesday), true), children(3));
        let result = fx.check(50);
        assert_eq!(result.status, AttendanceStatus::OutOfPeriod);
        assert!(result.indicators.is_empty());
        assert_eq!(result.week.expected_date, None);
    }

    #[test]
    fn test_expected_date_before_period_start_is_out_of_period() {
        let mut fx = Fixture::new(club(Some(Weekday::Monday), true), children(2));
        fx.period = Some(AcademicPeriod::new(2024, d(2024, 2, 7), d(2024, 12, 15), None).unwrap());
        let result = fx.check(1);
        assert_eq!(result.status, AttendanceStatus::OutOfPeriod);
        assert!(result.indicators.is_empty());
    }

    #[test]
    fn test_no_period_is_neutral() {
        let mut fx = Fixture::new(club(Some(Weekday::Wednesday), true), children(3));
        fx.period = None;
        let result = fx.check(1);
        assert_eq!(result.status, AttendanceStatus::Ok);
        assert!(result.indicators.is_empty());
        assert!(result.note.is_some());
        assert!(result.period.is_none());
        assert!(!result.has_problems());
    }

    #[test]
    fn test_partial_with_high_urgency() {
        let mut fx = Fixture::new(club(Some(Weekday::Wednesday), true), children(4));
        fx.pagelas = vec![pagela("c1", 2024, 1)];
        let result = fx.check(1);

        assert_eq!(result.status, AttendanceStatus::Partial);
        assert_eq!(result.children.with_record, 1);
        assert_eq!(result.children.missing, 3);
        assert_eq!(result.indicators.len(), 1);
        let indicator = &result.indicators[0];
        assert_eq!(indicator.severity, Severity::Warning);
        assert_eq!(indicator.urgency, Some(Urgency::High));
        assert_eq!(indicator.details["urgency"], "high");
    }

    #[test]
    fn test_urgency_tiers() {
        let thresholds = AttendanceThresholds::default();
        assert_eq!(thresholds.urgency_for(75.0), Urgency::High);
        assert_eq!(thresholds.urgency_for(50.0), Urgency::Medium);
        assert_eq!(thresholds.urgency_for(30.0), Urgency::Medium);
        assert_eq!(thresholds.urgency_for(25.0), Urgency::Low);
    }

    #[test]
    fn test_full_week_is_success() {
        let mut fx = Fixture::new(club(Some(Weekday::Wednesday), true), children(2));
        fx.pagelas = vec![pagela("c1", 2024, 1), pagela("c2", 2024, 1)];
        let result = fx.check(1);
        assert_eq!(result.status, AttendanceStatus::Ok);
        assert_eq!(result.indicators.len(), 1);
        assert_eq!(result.indicators[0].severity, Severity::Success);
    }

    #[test]
    fn test_pagelas_of_other_weeks_are_ignored() {
        let mut fx = Fixture::new(club(Some(Weekday::Wednesday), true), children(1));
        fx.pagelas = vec![pagela("c1", 2024, 2), pagela("c1", 2023, 1)];
        assert_eq!(fx.check(1).status, AttendanceStatus::Missing);
    }

    #[test]
    fn test_exception_takes_precedence() {
        let mut fx = Fixture::new(club(Some(Weekday::Wednesday), true), children(3));
        fx.exceptions = ExceptionRegistry::from_exceptions(vec![holiday(d(2024, 2, 14))]);

        // zero records
        let result = fx.check(2);
        assert_eq!(result.status, AttendanceStatus::Exception);
        assert_eq!(result.indicators.len(), 1);
        assert_eq!(result.indicators[0].indicator_type, IndicatorType::Exception);
        assert_eq!(result.indicators[0].severity, Severity::Info);
        assert_eq!(result.exception.as_ref().unwrap().date, d(2024, 2, 14));

        // all records
        fx.pagelas = vec![pagela("c1", 2024, 2), pagela("c2", 2024, 2), pagela("c3", 2024, 2)];
        assert_eq!(fx.check(2).status, AttendanceStatus::Exception);
    }

    #[test]
    fn test_exception_only_hits_matching_weekday() {
        let mut fx = Fixture::new(club(Some(Weekday::Thursday), true), children(1));
        fx.exceptions = ExceptionRegistry::from_exceptions(vec![holiday(d(2024, 2, 14))]);
        assert_eq!(fx.check(2).status, AttendanceStatus::Missing);
    }

    #[test]
    fn test_exception_suppresses_not_attending_indicator() {
        let mut kids = children(2);
        kids[1].active = false;
        let mut fx = Fixture::new(club(Some(Weekday::Wednesday), true), kids);
        fx.exceptions = ExceptionRegistry::from_exceptions(vec![holiday(d(2024, 2, 14))]);
        let result = fx.check(2);
        assert_eq!(result.indicators.len(), 1);
        assert_eq!(result.children.not_attending_count, 1);
    }

    #[test]
    fn test_inactive_child_only_changes_not_attending() {
        let mut fx = Fixture::new(club(Some(Weekday::Wednesday), true), children(3));
        fx.pagelas = vec![pagela("c1", 2024, 1)];
        let mut extra = children(4);
        extra[3].id = "c4".to_string();
        fx.children = extra;
        let before = fx.check(1);

        fx.children[3].active = false;
        let after = fx.check(1);

        // toggled child had no record: only eligibility and the informational lists move
        assert_eq!(before.status, AttendanceStatus::Partial);
        assert_eq!(after.status, AttendanceStatus::Partial);
        assert_eq!(before.children.with_record, after.children.with_record);
        assert_eq!(after.children.not_attending_count, 1);
        assert_eq!(after.children.not_attending_list[0].id, "c4");
        assert!(after.has_indicator(IndicatorType::ChildrenNotAttending));
        assert!(!before.has_indicator(IndicatorType::ChildrenNotAttending));
    }

    #[test]
    fn test_inactive_child_is_never_missing() {
        let mut kids = children(3);
        kids[2].active = false;
        let fx = Fixture::new(club(Some(Weekday::Wednesday), true), kids);
        let result = fx.check(1);
        assert_eq!(result.status, AttendanceStatus::Missing);
        assert_eq!(result.children.missing, 2);
        assert_eq!(result.children.not_attending_count, 1);
        assert_eq!(result.indicators.len(), 2);
        let not_attending = &result.indicators[1];
        assert_eq!(not_attending.indicator_type, IndicatorType::ChildrenNotAttending);
        assert_eq!(not_attending.severity, Severity::Warning);
        assert_eq!(not_attending.details["children"][0]["active"], false);
    }

    #[test]
    fn test_child_joined_after_week_is_not_eligible() {
        let mut kids = children(2);
        kids[1].joined_date = Some(d(2024, 2, 20));
        let mut fx = Fixture::new(club(Some(Weekday::Wednesday), true), kids);
        fx.pagelas = vec![pagela("c1", 2024, 1)];
        let result = fx.check(1);
        assert_eq!(result.status, AttendanceStatus::Ok);
        assert_eq!(result.children.active_count, 1);
        assert_eq!(result.children.not_attending_count, 1);
    }

    #[test]
    fn test_inactive_club_retires_everyone() {
        let fx = Fixture::new(club(Some(Weekday::Wednesday), false), children(2));
        let result = fx.check(1);
        assert_eq!(result.status, AttendanceStatus::Inactive);
        assert_eq!(result.children.active_count, 0);
        assert_eq!(result.children.not_attending_count, 2);
        assert!(result.has_indicator(IndicatorType::ClubInactive));
        assert!(result.has_indicator(IndicatorType::ChildrenNotAttending));
        assert!(result.children.not_attending_list.iter().all(|c| c.active));
    }

    #[test]
    fn test_no_weekday_is_inactive_with_info() {
        let fx = Fixture::new(club(None, true), children(2));
        let result = fx.check(1);
        assert_eq!(result.status, AttendanceStatus::Inactive);
        assert_eq!(result.indicators.len(), 1);
        assert_eq!(result.indicators[0].indicator_type, IndicatorType::NoWeekday);
        assert_eq!(result.indicators[0].severity, Severity::Info);
    }

    #[test]
    fn test_current_week_before_club_day_is_pending() {
        let mut fx = Fixture::new(club(Some(Weekday::Friday), true), children(2));
        fx.today = d(2024, 2, 6); // Tuesday of week 1
        let result = fx.check(1);
        assert_eq!(result.status, AttendanceStatus::Pending);
        assert!(result.indicators.is_empty());

        fx.pagelas = vec![pagela("c1", 2024, 1)];
        assert_eq!(fx.check(1).status, AttendanceStatus::Pending);
    }

    #[test]
    fn test_current_week_after_club_day() {
        let mut fx = Fixture::new(club(Some(Weekday::Monday), true), children(2));
        fx.today = d(2024, 2, 8); // Thursday of week 1
        assert_eq!(fx.check(1).status, AttendanceStatus::Missing);
    }

    #[test]
    fn test_future_week() {
        let mut fx = Fixture::new(club(Some(Weekday::Wednesday), true), children(2));
        assert_eq!(fx.check(10).status, AttendanceStatus::Pending);

        fx.pagelas = vec![pagela("c1", 2024, 10)];
        let partial = fx.check(10);
        assert_eq!(partial.status, AttendanceStatus::Partial);
        // day not passed: no warning
        assert!(partial.indicators.is_empty());
    }

    #[test]
    fn test_period_not_started_is_future() {
        let period = period_2024();
        let timing = AttendanceStatusEngine::week_timing(&period, 1, d(2024, 2, 7), d(2024, 1, 10));
        assert_eq!(timing, WeekTiming::Future);
        let timing = AttendanceStatusEngine::week_timing(&period, 45, d(2024, 12, 11), d(2025, 1, 10));
        assert_eq!(timing, WeekTiming::DayPassed);
    }

    #[test]
    fn test_no_eligible_children_is_warning() {
        let fx = Fixture::new(club(Some(Weekday::Wednesday), true), Vec::new());
        let result = fx.check(1);
        assert_eq!(result.status, AttendanceStatus::Missing);
        assert_eq!(result.indicators.len(), 1);
        assert_eq!(result.indicators[0].indicator_type, IndicatorType::NoChildren);
        assert_eq!(result.indicators[0].severity, Severity::Warning);
    }

    #[test]
    fn test_serialized_shape() {
        let fx = Fixture::new(club(Some(Weekday::Wednesday), true), children(1));
        let value = serde_json::to_value(fx.check(1)).unwrap();
        assert_eq!(value["clubNumber"], 7);
        assert_eq!(value["status"], "missing");
        assert_eq!(value["week"]["expectedDate"], "2024-02-07");
        assert_eq!(value["indicators"][0]["type"], "no_pagela");
        assert!(value["exception"].is_null());
    }
}
