// ==========================================
// Club Attendance - attendance API
// ==========================================
// Entry points for the admin backend:
//   check_club_week / check_all_clubs_week / get_detailed_indicators /
//   analyze_club_attendance / analyze_weekly_attendance / current_week
// Each call loads one snapshot, reads thresholds from config and asks
// the clock for "today".
// ==========================================

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use tracing::{info, instrument};

use crate::api::dto::{ClubAttendanceResponse, PageRequest, WeekReportResponse, WeeklyAnalysisResponse};
use crate::api::error::{validate_date_range, validate_week, ApiError, ApiResult};
use crate::config::AttendanceConfigReader;
use crate::engine::calendar::AcademicCalendar;
use crate::engine::clock::Clock;
use crate::engine::pagination::{paginate, Page};
use crate::engine::report::{
    DateRange, DetailedIndicators, ReportAggregator, ReportFilters, WeekPosition, WeekSummary,
};
use crate::engine::status::ClubCheckResult;
use crate::i18n::{set_locale, t_with_args};
use crate::repository::SnapshotRepository;

// ==========================================
// AttendanceApi
// ==========================================
pub struct AttendanceApi {
    snapshot_repo: Arc<SnapshotRepository>,
    config: Arc<dyn AttendanceConfigReader>,
    clock: Arc<dyn Clock>,
}

impl AttendanceApi {
    pub fn new(
        snapshot_repo: Arc<SnapshotRepository>,
        config: Arc<dyn AttendanceConfigReader>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            snapshot_repo,
            config,
            clock,
        }
    }

    /// Aggregator with the configured thresholds; also applies the locale
    async fn aggregator(&self) -> ApiResult<ReportAggregator> {
        set_locale(&self.config.get_locale().await?);
        Ok(ReportAggregator::new(
            self.config.get_attendance_thresholds().await?,
            self.config.get_alert_thresholds().await?,
        ))
    }

    /// Resolve page/limit against the configured sizes
    async fn page_params(&self, request: PageRequest) -> ApiResult<(usize, usize, usize)> {
        let default_limit = self.config.get_default_page_size().await?;
        let max_limit = self.config.get_max_page_size().await?;
        Ok((
            request.page.unwrap_or(1),
            request.limit.unwrap_or(default_limit),
            max_limit,
        ))
    }

    /// Academic week containing today
    ///
    /// # Returns
    /// - Ok(None): today is outside every active period
    pub async fn current_week(&self) -> ApiResult<Option<WeekPosition>> {
        let today = self.clock.today();
        let periods = self.snapshot_repo.active_periods()?;
        Ok(AcademicCalendar::locate(&periods, today).map(|(period, week)| WeekPosition {
            year: period.year,
            week,
        }))
    }

    /// Status of one club in one academic week
    ///
    /// # Errors
    /// - InvalidInput: week 0
    /// - NotFound: unknown club
    /// - InvariantViolation: club weekday not recognized
    #[instrument(skip(self))]
    pub async fn check_club_week(&self, club_id: &str, year: i32, week: u32) -> ApiResult<ClubCheckResult> {
        if club_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("club id must not be empty".to_string()));
        }
        validate_week(week)?;

        let aggregator = self.aggregator().await?;
        let snapshot = self.snapshot_repo.load_year(year)?;
        aggregator
            .check_club(&snapshot, club_id, week, self.clock.today())?
            .ok_or_else(|| ApiError::NotFound(format!("club {} does not exist", club_id)))
    }

    /// Resolve an optional (year, week) pair against the clock
    ///
    /// # Returns
    /// - Ok(None): nothing given and today is outside every period
    async fn resolve_week(&self, year: Option<i32>, week: Option<u32>) -> ApiResult<Option<(i32, u32)>> {
        if let (Some(year), Some(week)) = (year, week) {
            validate_week(week)?;
            return Ok(Some((year, week)));
        }
        let current = self.current_week().await?;
        match (current, year, week) {
            (Some(current), None, None) => Ok(Some((current.year, current.week))),
            (Some(current), Some(year), None) if year == current.year => {
                Ok(Some((current.year, current.week)))
            }
            (Some(current), None, Some(week)) => {
                validate_week(week)?;
                Ok(Some((current.year, week)))
            }
            (None, None, None) => Ok(None),
            _ => Err(ApiError::InvalidInput(
                "both year and week are required outside the current academic period".to_string(),
            )),
        }
    }

    /// Every club for one week, sorted by severity then club number
    ///
    /// # Arguments
    /// - year/week: omitted values resolve to the current academic week
    /// - filters: narrow `clubs`; `summary` always covers every club
    #[instrument(skip(self, filters))]
    pub async fn check_all_clubs_week(
        &self,
        year: Option<i32>,
        week: Option<u32>,
        filters: &ReportFilters,
        page: PageRequest,
    ) -> ApiResult<WeekReportResponse> {
        let aggregator = self.aggregator().await?;
        let (page, limit, max_limit) = self.page_params(page).await?;
        let today = self.clock.today();

        let Some((year, week)) = self.resolve_week(year, week).await? else {
            let empty: Page<ClubCheckResult> = paginate(Vec::new(), page, limit, max_limit);
            return Ok(WeekReportResponse {
                year: today.year(),
                week: 0,
                summary: WeekSummary::default(),
                clubs: empty.items,
                pagination: empty.pagination,
                current_week: None,
                inactive_clubs: Vec::new(),
                children_not_attending: Vec::new(),
                note: Some(t_with_args("note.no_current_week", &[("date", &today.to_string())])),
            });
        };

        let snapshot = self.snapshot_repo.load_year(year)?;
        let report = aggregator.week_report(&snapshot, week, today, filters).await?;
        let clubs = paginate(report.clubs, page, limit, max_limit);

        Ok(WeekReportResponse {
            year: report.year,
            week: report.week,
            summary: report.summary,
            clubs: clubs.items,
            pagination: clubs.pagination,
            current_week: report.current_week,
            inactive_clubs: report.inactive_clubs,
            children_not_attending: report.children_not_attending,
            note: report.note,
        })
    }

    /// Indicator, club and weekday breakdown of one week
    #[instrument(skip(self, filters))]
    pub async fn get_detailed_indicators(
        &self,
        year: i32,
        week: u32,
        filters: &ReportFilters,
    ) -> ApiResult<DetailedIndicators> {
        validate_week(week)?;
        let aggregator = self.aggregator().await?;
        let snapshot = self.snapshot_repo.load_year(year)?;
        let report = aggregator
            .week_report(&snapshot, week, self.clock.today(), &ReportFilters::default())
            .await?;
        Ok(aggregator.detailed_indicators(&report, filters))
    }

    /// Timeline, streaks and alerts of one club
    ///
    /// # Arguments
    /// - start/end: optional range; missing bounds use the period bounds
    #[instrument(skip(self))]
    pub async fn analyze_club_attendance(
        &self,
        club_id: &str,
        year: i32,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        page: PageRequest,
    ) -> ApiResult<ClubAttendanceResponse> {
        if let (Some(start), Some(end)) = (start, end) {
            validate_date_range(start, end)?;
        }
        let aggregator = self.aggregator().await?;
        let (page, limit, max_limit) = self.page_params(page).await?;
        let snapshot = self.snapshot_repo.load_year(year)?;

        let range = match (&snapshot.period, start, end) {
            (_, None, None) | (None, _, _) => None,
            (Some(period), start, end) => Some(DateRange {
                start: start.unwrap_or(period.start_date),
                end: end.unwrap_or(period.end_date),
            }),
        };

        let timeline = aggregator
            .club_timeline(&snapshot, club_id, range, self.clock.today())?
            .ok_or_else(|| ApiError::NotFound(format!("club {} does not exist", club_id)))?;

        info!(
            club_id,
            weeks = timeline.timeline.len(),
            missing = timeline.missing_weeks.len(),
            alerts = timeline.alerts.len(),
            "club attendance analyzed"
        );

        let weeks = paginate(timeline.timeline, page, limit, max_limit);
        let missing = paginate(timeline.missing_weeks, page, limit, max_limit);

        Ok(ClubAttendanceResponse {
            club_id: timeline.club_id,
            club_number: timeline.club_number,
            weekday: timeline.weekday,
            period: timeline.period,
            range: timeline.range,
            attendance: timeline.attendance,
            alerts: timeline.alerts,
            timeline: weeks.items,
            timeline_pagination: weeks.pagination,
            missing_weeks: missing.items,
            missing_weeks_pagination: missing.pagination,
            note: timeline.note,
        })
    }

    /// Record presence per club for one week
    ///
    /// # Errors
    /// - NotFound: no active period for `year`
    /// - InvalidInput: week outside the period
    #[instrument(skip(self))]
    pub async fn analyze_weekly_attendance(
        &self,
        year: i32,
        week: u32,
        page: PageRequest,
    ) -> ApiResult<WeeklyAnalysisResponse> {
        validate_week(week)?;
        let aggregator = self.aggregator().await?;
        let (page, limit, max_limit) = self.page_params(page).await?;
        let snapshot = self.snapshot_repo.load_year(year)?;

        let analysis = aggregator
            .weekly_analysis(&snapshot, week)?
            .ok_or_else(|| ApiError::NotFound(format!("academic period {} does not exist", year)))?;
        let clubs = paginate(analysis.clubs, page, limit, max_limit);

        Ok(WeeklyAnalysisResponse {
            year: analysis.year,
            week: analysis.week,
            week_range: analysis.week_range,
            clubs: clubs.items,
            pagination: clubs.pagination,
            summary: analysis.summary,
        })
    }
}
