// ==========================================
// Club Attendance - report aggregator
// ==========================================
// Drives AttendanceStatusEngine over (club, week) pairs and rolls the
// results up:
//   - week_report:          every club for one week, sorted + filtered
//   - club_timeline:        one club over a date range, streaks + alerts
//   - detailed_indicators:  indicator/club/statistics breakdown of a week
//   - weekly_analysis:      record presence per club for one week
// Input is always one AttendanceSnapshot; nothing here does I/O.
// ==========================================

use crate::domain::club::Club;
use crate::domain::error::CalendarError;
use crate::domain::snapshot::AttendanceSnapshot;
use crate::domain::types::{AttendanceStatus, IndicatorType, Severity, Weekday};
use crate::domain::{Child, Pagela};
use crate::engine::calendar::AcademicCalendar;
use crate::engine::exception_registry::ExceptionRegistry;
use crate::engine::status::{
    AttendanceStatusEngine, AttendanceThresholds, ClubCheckResult, ClubWeekContext, ExceptionRef,
    Indicator, NotAttendingChild, PeriodRef,
};
use crate::i18n::{t, t_with_args};
use chrono::NaiveDate;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, instrument};

// ==========================================
// Alert thresholds
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Longest missing run that raises a critical alert
    pub consecutive_missing_weeks: u32,
    /// Record rate (percent) under which a warning is raised
    pub low_attendance_rate_pct: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            consecutive_missing_weeks: 3,
            low_attendance_rate_pct: 75.0,
        }
    }
}

// ==========================================
// Filters
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportFilters {
    pub status: Option<AttendanceStatus>,
    pub severity: Option<Severity>,
    pub weekday: Option<Weekday>,
    pub indicator_type: Option<IndicatorType>,
    pub has_problems: Option<bool>,
}

impl ReportFilters {
    pub fn is_empty(&self) -> bool {
        self == &ReportFilters::default()
    }

    pub fn matches(&self, result: &ClubCheckResult) -> bool {
        self.status.map_or(true, |s| result.status == s)
            && self.severity.map_or(true, |s| result.has_severity(s))
            && self.weekday.map_or(true, |w| result.weekday == Some(w))
            && self.indicator_type.map_or(true, |i| result.has_indicator(i))
            && self.has_problems.map_or(true, |p| result.has_problems() == p)
    }
}

// ==========================================
// Week report
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekPosition {
    pub year: i32,
    pub week: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSummary {
    pub total_clubs: usize,
    pub clubs_ok: usize,
    pub clubs_pending: usize,
    pub clubs_partial: usize,
    pub clubs_missing: usize,
    pub clubs_exception: usize,
    pub clubs_inactive: usize,
    pub clubs_out_of_period: usize,
    pub children_not_attending: usize,
    pub clubs_with_problems: usize,
}

impl WeekSummary {
    fn from_results(results: &[ClubCheckResult]) -> Self {
        let mut summary = WeekSummary {
            total_clubs: results.len(),
            ..Default::default()
        };
        for result in results {
            match result.status {
                AttendanceStatus::Ok => summary.clubs_ok += 1,
                AttendanceStatus::Pending => summary.clubs_pending += 1,
                AttendanceStatus::Partial => summary.clubs_partial += 1,
                AttendanceStatus::Missing => summary.clubs_missing += 1,
                AttendanceStatus::Exception => summary.clubs_exception += 1,
                AttendanceStatus::Inactive => summary.clubs_inactive += 1,
                AttendanceStatus::OutOfPeriod => summary.clubs_out_of_period += 1,
            }
            summary.children_not_attending += result.children.not_attending_count;
            if result.has_problems() {
                summary.clubs_with_problems += 1;
            }
        }
        summary
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InactiveClubRef {
    pub club_id: String,
    pub club_number: i32,
    pub weekday: Option<Weekday>,
    pub club_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubChildNotAttending {
    pub club_id: String,
    pub club_number: i32,
    #[serde(flatten)]
    pub child: NotAttendingChild,
}

/// All clubs for one academic week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekReport {
    pub year: i32,
    pub week: u32,
    /// Counts over every club, before filters
    pub summary: WeekSummary,
    /// Filtered, sorted by status severity then club number
    pub clubs: Vec<ClubCheckResult>,
    pub current_week: Option<WeekPosition>,
    pub inactive_clubs: Vec<InactiveClubRef>,
    pub children_not_attending: Vec<ClubChildNotAttending>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ==========================================
// Club timeline
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineWeek {
    pub week: u32,
    pub expected_date: Option<NaiveDate>,
    pub status: AttendanceStatus,
    pub has_record: bool,
    pub with_record: usize,
    pub expected: usize,
    pub exception: Option<ExceptionRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingWeek {
    pub week: u32,
    pub expected_date: Option<NaiveDate>,
    pub expected: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStats {
    pub weeks_with_record: usize,
    pub weeks_expected: usize,
    pub weeks_missing: usize,
    pub attendance_rate: f64,
    /// Longest run of weeks with records, exception/pending weeks skipped
    pub consecutive_weeks_present: u32,
    /// Longest run of missing weeks, exception/pending weeks skipped
    pub consecutive_weeks_missing: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    ConsecutiveMissing,
    LowAttendance,
    MissingWeeks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubAlert {
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub severity: Severity,
    pub message: String,
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubTimeline {
    pub club_id: String,
    pub club_number: i32,
    pub weekday: Option<Weekday>,
    pub period: Option<PeriodRef>,
    pub range: Option<DateRange>,
    pub attendance: AttendanceStats,
    pub alerts: Vec<ClubAlert>,
    pub timeline: Vec<TimelineWeek>,
    pub missing_weeks: Vec<MissingWeek>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

// ==========================================
// Detailed indicators
// ==========================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveSummary {
    pub total_clubs: usize,
    pub clubs_with_problems: usize,
    pub critical_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub success_count: usize,
    pub children_not_attending: usize,
    pub completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubIndicator {
    pub club_id: String,
    pub club_number: i32,
    #[serde(flatten)]
    pub indicator: Indicator,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorBreakdown {
    pub by_type: BTreeMap<String, Vec<ClubIndicator>>,
    pub critical: Vec<ClubIndicator>,
    pub warning: Vec<ClubIndicator>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubStatusRef {
    pub club_id: String,
    pub club_number: i32,
    pub weekday: Option<Weekday>,
    pub status: AttendanceStatus,
}

impl From<&ClubCheckResult> for ClubStatusRef {
    fn from(result: &ClubCheckResult) -> Self {
        Self {
            club_id: result.club_id.clone(),
            club_number: result.club_number,
            weekday: result.weekday,
            status: result.status,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubBreakdown {
    pub by_status: BTreeMap<String, Vec<ClubStatusRef>>,
    pub with_problems: Vec<ClubStatusRef>,
    pub critical: Vec<ClubStatusRef>,
    pub warning: Vec<ClubStatusRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionStats {
    pub total_clubs: usize,
    pub clubs_ok: usize,
    pub clubs_with_problems: usize,
    pub total_children: usize,
    pub expected_children: usize,
    pub children_with_record: usize,
    pub children_missing: usize,
    pub children_not_attending: usize,
    pub completion_rate: f64,
}

impl CompletionStats {
    fn add(&mut self, result: &ClubCheckResult) {
        self.total_clubs += 1;
        if result.status == AttendanceStatus::Ok {
            self.clubs_ok += 1;
        }
        if result.has_problems() {
            self.clubs_with_problems += 1;
        }
        self.total_children += result.children.total;
        self.children_not_attending += result.children.not_attending_count;
        if is_expected(result.status) {
            self.expected_children += result.children.active_count;
            self.children_with_record += result.children.with_record;
            self.children_missing += result.children.missing;
        }
    }

    fn finish(mut self) -> Self {
        self.completion_rate = percentage(self.children_with_record, self.expected_children);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub by_weekday: BTreeMap<String, CompletionStats>,
    pub overall: CompletionStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub severity: Severity,
    pub message: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedIndicators {
    pub year: i32,
    pub week: u32,
    pub executive_summary: ExecutiveSummary,
    pub indicators: IndicatorBreakdown,
    pub clubs: ClubBreakdown,
    pub statistics: Statistics,
    pub recommendations: Vec<Recommendation>,
    pub filters_applied: ReportFilters,
}

// ==========================================
// Weekly analysis
// ==========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyClubAttendance {
    pub club_id: String,
    pub club_number: i32,
    pub weekday: Option<Weekday>,
    pub active: bool,
    pub expected_date: Option<NaiveDate>,
    /// False for inactive or unscheduled clubs, exception dates and
    /// dates outside the period; such clubs stay out of the rate
    pub expected: bool,
    pub has_record: bool,
    pub record_count: usize,
    pub children_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklySummary {
    pub total_clubs: usize,
    pub clubs_expected: usize,
    pub clubs_not_expected: usize,
    pub clubs_with_record: usize,
    pub clubs_missing: usize,
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyAnalysis {
    pub year: i32,
    pub week: u32,
    pub week_range: DateRange,
    pub clubs: Vec<WeeklyClubAttendance>,
    pub summary: WeeklySummary,
}

// ==========================================
// Helpers
// ==========================================

/// Statuses in which attendance was expected of the club
fn is_expected(status: AttendanceStatus) -> bool {
    matches!(
        status,
        AttendanceStatus::Ok | AttendanceStatus::Partial | AttendanceStatus::Missing
    )
}

/// `part / whole * 100`, two decimals; 0 when `whole` is 0
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let pct = part as f64 / whole as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

/// Snapshot regrouped for per-club lookups
struct SnapshotIndex {
    exceptions: ExceptionRegistry,
    children: HashMap<String, Vec<Child>>,
    pagelas: HashMap<String, Vec<Pagela>>,
}

impl SnapshotIndex {
    fn build(snapshot: &AttendanceSnapshot) -> Self {
        Self {
            exceptions: ExceptionRegistry::from_exceptions(snapshot.exceptions.iter().cloned()),
            children: snapshot.children_by_club(),
            pagelas: snapshot.pagelas_by_club(),
        }
    }

    fn children_of(&self, club_id: &str) -> &[Child] {
        self.children.get(club_id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn pagelas_of(&self, club_id: &str) -> &[Pagela] {
        self.pagelas.get(club_id).map(Vec::as_slice).unwrap_or(&[])
    }
}

// ==========================================
// ReportAggregator
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ReportAggregator {
    engine: AttendanceStatusEngine,
    alerts: AlertThresholds,
}

impl ReportAggregator {
    pub fn new(thresholds: AttendanceThresholds, alerts: AlertThresholds) -> Self {
        Self {
            engine: AttendanceStatusEngine::new(thresholds),
            alerts,
        }
    }

    fn check_indexed(
        &self,
        snapshot: &AttendanceSnapshot,
        index: &SnapshotIndex,
        club: &Club,
        week: u32,
        today: NaiveDate,
    ) -> Result<ClubCheckResult, CalendarError> {
        let ctx = ClubWeekContext {
            club,
            year: snapshot.year,
            week,
            period: snapshot.period.as_ref(),
            children: index.children_of(&club.id),
            pagelas: index.pagelas_of(&club.id),
            exceptions: &index.exceptions,
            today,
        };
        self.engine.check_club_week(&ctx)
    }

    /// Classify a single club; `None` when the club is not in the snapshot
    pub fn check_club(
        &self,
        snapshot: &AttendanceSnapshot,
        club_id: &str,
        week: u32,
        today: NaiveDate,
    ) -> Result<Option<ClubCheckResult>, CalendarError> {
        let Some(club) = snapshot.find_club(club_id) else {
            return Ok(None);
        };
        let index = SnapshotIndex::build(snapshot);
        self.check_indexed(snapshot, &index, club, week, today).map(Some)
    }

    /// Classify every club for one week.
    ///
    /// Clubs are classified concurrently, then sorted by status severity
    /// and club number. `summary`, `inactive_clubs` and
    /// `children_not_attending` cover every club; `clubs` is filtered.
    #[instrument(skip(self, snapshot, filters), fields(year = snapshot.year, clubs = snapshot.clubs.len()))]
    pub async fn week_report(
        &self,
        snapshot: &AttendanceSnapshot,
        week: u32,
        today: NaiveDate,
        filters: &ReportFilters,
    ) -> Result<WeekReport, CalendarError> {
        let index = SnapshotIndex::build(snapshot);

        let tasks = snapshot.clubs.iter().map(|club| {
            let index = &index;
            async move { self.check_indexed(snapshot, index, club, week, today) }
        });
        let mut results = join_all(tasks)
            .await
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;

        results.sort_by(|a, b| {
            a.status
                .cmp(&b.status)
                .then_with(|| a.club_number.cmp(&b.club_number))
        });

        let summary = WeekSummary::from_results(&results);

        let inactive_clubs = results
            .iter()
            .filter(|r| r.status == AttendanceStatus::Inactive)
            .map(|r| InactiveClubRef {
                club_id: r.club_id.clone(),
                club_number: r.club_number,
                weekday: r.weekday,
                club_active: !r.has_indicator(IndicatorType::ClubInactive),
            })
            .collect();

        let children_not_attending = results
            .iter()
            .flat_map(|r| {
                r.children
                    .not_attending_list
                    .iter()
                    .map(move |child| ClubChildNotAttending {
                        club_id: r.club_id.clone(),
                        club_number: r.club_number,
                        child: child.clone(),
                    })
            })
            .collect();

        let current_week = snapshot.period.as_ref().and_then(|period| {
            AcademicCalendar::current_week(period, today).map(|week| WeekPosition {
                year: period.year,
                week,
            })
        });

        let note = snapshot.period.is_none().then(|| {
            t_with_args("note.no_period", &[("year", &snapshot.year.to_string())])
        });

        let clubs: Vec<ClubCheckResult> = if filters.is_empty() {
            results
        } else {
            results.into_iter().filter(|r| filters.matches(r)).collect()
        };

        info!(
            week,
            total = summary.total_clubs,
            missing = summary.clubs_missing,
            partial = summary.clubs_partial,
            with_problems = summary.clubs_with_problems,
            returned = clubs.len(),
            "week report built"
        );

        Ok(WeekReport {
            year: snapshot.year,
            week,
            summary,
            clubs,
            current_week,
            inactive_clubs,
            children_not_attending,
            note,
        })
    }

    /// Longest present run and longest missing run.
    ///
    /// Exception and pending weeks are skipped; inactive and out-of-period
    /// weeks end both runs.
    pub fn streaks(statuses: &[AttendanceStatus]) -> (u32, u32) {
        let (mut present, mut missing) = (0u32, 0u32);
        let (mut best_present, mut best_missing) = (0u32, 0u32);

        for status in statuses {
            match status {
                AttendanceStatus::Exception | AttendanceStatus::Pending => continue,
                AttendanceStatus::Ok | AttendanceStatus::Partial => {
                    present += 1;
                    missing = 0;
                }
                AttendanceStatus::Missing => {
                    missing += 1;
                    present = 0;
                }
                AttendanceStatus::Inactive | AttendanceStatus::OutOfPeriod => {
                    present = 0;
                    missing = 0;
                }
            }
            best_present = best_present.max(present);
            best_missing = best_missing.max(missing);
        }

        (best_present, best_missing)
    }

    fn build_alerts(&self, stats: &AttendanceStats) -> Vec<ClubAlert> {
        let mut alerts = Vec::new();
        let streak_limit = self.alerts.consecutive_missing_weeks;

        if streak_limit > 0 && stats.consecutive_weeks_missing >= streak_limit {
            alerts.push(ClubAlert {
                alert_type: AlertType::ConsecutiveMissing,
                severity: Severity::Critical,
                message: t_with_args(
                    "alert.consecutive_missing",
                    &[("weeks", &stats.consecutive_weeks_missing.to_string())],
                ),
                details: json!({
                    "weeks": stats.consecutive_weeks_missing,
                    "threshold": streak_limit,
                }),
            });
        } else if stats.weeks_missing > 0 {
            alerts.push(ClubAlert {
                alert_type: AlertType::MissingWeeks,
                severity: Severity::Info,
                message: t_with_args(
                    "alert.missing_weeks",
                    &[("weeks", &stats.weeks_missing.to_string())],
                ),
                details: json!({ "weeks": stats.weeks_missing }),
            });
        }

        if stats.weeks_expected > 0 && stats.attendance_rate < self.alerts.low_attendance_rate_pct {
            alerts.push(ClubAlert {
                alert_type: AlertType::LowAttendance,
                severity: Severity::Warning,
                message: t_with_args(
                    "alert.low_attendance",
                    &[
                        ("rate", &format!("{:.1}", stats.attendance_rate)),
                        ("threshold", &format!("{:.0}", self.alerts.low_attendance_rate_pct)),
                    ],
                ),
                details: json!({
                    "rate": stats.attendance_rate,
                    "threshold": self.alerts.low_attendance_rate_pct,
                }),
            });
        }

        alerts
    }

    /// Classify every week of `range` (default: whole period) for one club.
    ///
    /// # Returns
    /// `None` when the club is not in the snapshot
    #[instrument(skip(self, snapshot), fields(year = snapshot.year))]
    pub fn club_timeline(
        &self,
        snapshot: &AttendanceSnapshot,
        club_id: &str,
        range: Option<DateRange>,
        today: NaiveDate,
    ) -> Result<Option<ClubTimeline>, CalendarError> {
        let Some(club) = snapshot.find_club(club_id) else {
            return Ok(None);
        };

        let mut timeline = ClubTimeline {
            club_id: club.id.clone(),
            club_number: club.number,
            weekday: club.weekday,
            period: snapshot.period.as_ref().map(PeriodRef::from),
            range: None,
            attendance: AttendanceStats::default(),
            alerts: Vec::new(),
            timeline: Vec::new(),
            missing_weeks: Vec::new(),
            note: None,
        };

        let Some(period) = snapshot.period.as_ref() else {
            timeline.note = Some(t_with_args(
                "note.no_period",
                &[("year", &snapshot.year.to_string())],
            ));
            return Ok(Some(timeline));
        };

        let range = range.unwrap_or(DateRange {
            start: period.start_date,
            end: period.end_date,
        });
        timeline.range = Some(range);

        let index = SnapshotIndex::build(snapshot);
        let weeks = AcademicCalendar::weeks_between(period, range.start, range.end);
        debug!(club_id, weeks = weeks.len(), "classifying club timeline");

        for week in weeks {
            let result = self.check_indexed(snapshot, &index, club, week, today)?;
            if result.status == AttendanceStatus::Missing && result.children.active_count > 0 {
                timeline.missing_weeks.push(MissingWeek {
                    week,
                    expected_date: result.week.expected_date,
                    expected: result.children.active_count,
                });
            }
            timeline.timeline.push(TimelineWeek {
                week,
                expected_date: result.week.expected_date,
                status: result.status,
                has_record: result.children.with_record > 0,
                with_record: result.children.with_record,
                expected: result.children.active_count,
                exception: result.exception,
            });
        }

        // weeks without eligible children are a roster gap, not an attendance failure
        let statuses: Vec<AttendanceStatus> = timeline
            .timeline
            .iter()
            .filter(|w| !(w.status == AttendanceStatus::Missing && w.expected == 0))
            .map(|w| w.status)
            .collect();
        let (present, missing) = Self::streaks(&statuses);
        let weeks_expected = statuses.iter().filter(|s| is_expected(**s)).count();
        let weeks_with_record = statuses
            .iter()
            .filter(|s| matches!(s, AttendanceStatus::Ok | AttendanceStatus::Partial))
            .count();

        timeline.attendance = AttendanceStats {
            weeks_with_record,
            weeks_expected,
            weeks_missing: timeline.missing_weeks.len(),
            attendance_rate: percentage(weeks_with_record, weeks_expected),
            consecutive_weeks_present: present,
            consecutive_weeks_missing: missing,
        };
        timeline.alerts = self.build_alerts(&timeline.attendance);

        Ok(Some(timeline))
    }

    /// Breakdown of a week report by indicator, club status and weekday
    pub fn detailed_indicators(&self, report: &WeekReport, filters: &ReportFilters) -> DetailedIndicators {
        let clubs: Vec<&ClubCheckResult> = report.clubs.iter().filter(|r| filters.matches(r)).collect();

        let mut summary = ExecutiveSummary {
            total_clubs: clubs.len(),
            ..Default::default()
        };
        let mut indicators = IndicatorBreakdown::default();
        let mut breakdown = ClubBreakdown::default();
        let mut statistics = Statistics::default();

        for result in &clubs {
            let club_ref = ClubStatusRef::from(*result);

            for indicator in &result.indicators {
                let entry = ClubIndicator {
                    club_id: result.club_id.clone(),
                    club_number: result.club_number,
                    indicator: indicator.clone(),
                };
                match indicator.severity {
                    Severity::Critical => {
                        summary.critical_count += 1;
                        indicators.critical.push(entry.clone());
                    }
                    Severity::Warning => {
                        summary.warning_count += 1;
                        indicators.warning.push(entry.clone());
                    }
                    Severity::Info => summary.info_count += 1,
                    Severity::Success => summary.success_count += 1,
                }
                indicators
                    .by_type
                    .entry(indicator.indicator_type.as_str().to_string())
                    .or_default()
                    .push(entry);
            }

            breakdown
                .by_status
                .entry(result.status.as_str().to_string())
                .or_default()
                .push(club_ref.clone());
            if result.has_problems() {
                breakdown.with_problems.push(club_ref.clone());
            }
            if result.has_severity(Severity::Critical) {
                breakdown.critical.push(club_ref.clone());
            } else if result.has_severity(Severity::Warning) {
                breakdown.warning.push(club_ref.clone());
            }

            let weekday_key = result
                .weekday
                .map(|w| w.to_db_str().to_string())
                .unwrap_or_else(|| "none".to_string());
            statistics.by_weekday.entry(weekday_key).or_default().add(result);
            statistics.overall.add(result);
        }

        statistics.by_weekday = statistics
            .by_weekday
            .into_iter()
            .map(|(k, v)| (k, v.finish()))
            .collect();
        statistics.overall = statistics.overall.finish();

        summary.clubs_with_problems = breakdown.with_problems.len();
        summary.children_not_attending = statistics.overall.children_not_attending;
        summary.completion_rate = statistics.overall.completion_rate;

        let recommendations = Self::recommendations(&clubs, &summary);

        DetailedIndicators {
            year: report.year,
            week: report.week,
            executive_summary: summary,
            indicators,
            clubs: breakdown,
            statistics,
            recommendations,
            filters_applied: filters.clone(),
        }
    }

    fn recommendations(clubs: &[&ClubCheckResult], summary: &ExecutiveSummary) -> Vec<Recommendation> {
        let count = |indicator_type: IndicatorType| {
            clubs.iter().filter(|r| r.has_indicator(indicator_type)).count()
        };

        let candidates = [
            ("recommendation.critical", Severity::Critical, count(IndicatorType::NoPagela)),
            ("recommendation.partial", Severity::Warning, count(IndicatorType::PagelaIncomplete)),
            ("recommendation.no_children", Severity::Warning, count(IndicatorType::NoChildren)),
            ("recommendation.not_attending", Severity::Info, summary.children_not_attending),
            ("recommendation.no_weekday", Severity::Info, count(IndicatorType::NoWeekday)),
        ];

        let mut recommendations: Vec<Recommendation> = candidates
            .into_iter()
            .filter(|(_, _, n)| *n > 0)
            .map(|(key, severity, n)| Recommendation {
                severity,
                message: t_with_args(key, &[("count", &n.to_string())]),
                count: n,
            })
            .collect();

        if recommendations.is_empty() {
            recommendations.push(Recommendation {
                severity: Severity::Success,
                message: t("recommendation.all_ok"),
                count: 0,
            });
        }
        recommendations
    }

    /// Record presence per club for one week.
    ///
    /// # Returns
    /// `None` when the snapshot has no period for its year
    ///
    /// # Errors
    /// - `WeekOutOfPeriod` when `week` is 0 or beyond the period
    pub fn weekly_analysis(
        &self,
        snapshot: &AttendanceSnapshot,
        week: u32,
    ) -> Result<Option<WeeklyAnalysis>, CalendarError> {
        let Some(period) = snapshot.period.as_ref() else {
            return Ok(None);
        };
        let (start, end) = AcademicCalendar::week_range(period, week)?;
        let index = SnapshotIndex::build(snapshot);

        let mut clubs: Vec<WeeklyClubAttendance> = snapshot
            .clubs
            .iter()
            .map(|club| {
                let recorded: HashSet<&str> = index
                    .pagelas_of(&club.id)
                    .iter()
                    .filter(|p| p.year == snapshot.year && p.week == week)
                    .map(|p| p.child_id.as_str())
                    .collect();
                let expected_date = club
                    .weekday
                    .and_then(|w| AcademicCalendar::expected_date(period, week, w).ok());
                let expected = club.active
                    && expected_date.is_some_and(|date| {
                        period.contains(date) && index.exceptions.lookup(date).is_none()
                    });
                WeeklyClubAttendance {
                    club_id: club.id.clone(),
                    club_number: club.number,
                    weekday: club.weekday,
                    active: club.active,
                    expected_date,
                    expected,
                    has_record: !recorded.is_empty(),
                    record_count: recorded.len(),
                    children_count: index.children_of(&club.id).len(),
                }
            })
            .collect();
        clubs.sort_by_key(|c| c.club_number);

        let clubs_expected = clubs.iter().filter(|c| c.expected).count();
        let clubs_with_record = clubs.iter().filter(|c| c.expected && c.has_record).count();
        let summary = WeeklySummary {
            total_clubs: clubs.len(),
            clubs_expected,
            clubs_not_expected: clubs.len() - clubs_expected,
            clubs_with_record,
            clubs_missing: clubs_expected - clubs_with_record,
            attendance_rate: percentage(clubs_with_record, clubs_expected),
        };

        Ok(Some(WeeklyAnalysis {
            year: snapshot.year,
            week,
            week_range: DateRange { start, end },
            clubs,
            summary,
        }))
    }
}
