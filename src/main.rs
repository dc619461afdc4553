// ==========================================
// Club Attendance - command line entry
// ==========================================
// Prints the all-clubs report for one academic week as JSON.
//
// Usage: club-attendance [YEAR WEEK]
//   no arguments: current academic week
// Env: CLUB_ATTENDANCE_DB_PATH, RUST_LOG,
//      CLUB_ATTENDANCE_LOG_FORMAT=json for JSON log lines
// ==========================================

use anyhow::{bail, Context, Result};
use club_attendance::api::PageRequest;
use club_attendance::app::{get_default_db_path, AppState};
use club_attendance::engine::ReportFilters;

fn parse_args() -> Result<(Option<i32>, Option<u32>)> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => Ok((None, None)),
        [year, week] => {
            let year = year.parse::<i32>().with_context(|| format!("invalid year '{}'", year))?;
            let week = week.parse::<u32>().with_context(|| format!("invalid week '{}'", week))?;
            Ok((Some(year), Some(week)))
        }
        _ => bail!("usage: club-attendance [YEAR WEEK]"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    match std::env::var("CLUB_ATTENDANCE_LOG_FORMAT").as_deref() {
        Ok("json") => club_attendance::logging::init_json(),
        _ => club_attendance::logging::init(),
    }

    tracing::info!(version = club_attendance::VERSION, "{}", club_attendance::APP_NAME);

    let (year, week) = parse_args()?;

    let db_path = get_default_db_path();
    tracing::info!(db_path = %db_path, "using database");

    let state = AppState::new(db_path).map_err(anyhow::Error::msg)?;

    let report = state
        .attendance_api
        .check_all_clubs_week(year, week, &ReportFilters::default(), PageRequest::default())
        .await
        .context("failed to build the weekly report")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
