// ==========================================
// API test environment
// ==========================================
// Temp database + AppState on a frozen clock, with a standard fixture:
//
//   period 2024: 2024-02-05 (Mon) .. 2024-11-29 (Fri), weeks 1..=43
//   club-01 #1 Wednesday: ana, bia      -> both recorded in week 5
//   club-04 #4 Wednesday: caio, davi    -> only caio recorded in week 5
//   club-09 #9 Saturday : enzo          -> never recorded
//   club-02 #2 inactive Saturday: gabi
//   club-07 #7 no weekday: hugo
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

use super::test_data_builder::{
    date, AcademicPeriodBuilder, ChildBuilder, ClubBuilder, ExceptionBuilder, PagelaBuilder,
};
use chrono::NaiveDate;
use club_attendance::app::AppState;
use club_attendance::domain::types::Weekday;
use club_attendance::engine::clock::FixedClock;
use std::sync::Arc;
use tempfile::NamedTempFile;

pub use test_helpers::{insert_raw_club, insert_test_config, open_test_connection};

pub const YEAR: i32 = 2024;

pub struct ApiTestEnv {
    pub db_path: String,
    pub state: AppState,

    // keeps the temp file alive
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// Empty database, clock frozen on `today`
    pub fn new(today: NaiveDate) -> Result<Self, String> {
        club_attendance::logging::init_test();

        let (temp_file, db_path) =
            test_helpers::create_test_db().map_err(|e| format!("cannot create test db: {}", e))?;

        let state = AppState::with_clock(db_path.clone(), Arc::new(FixedClock(today)))?;

        Ok(Self {
            db_path,
            state,
            _temp_file: temp_file,
        })
    }

    /// Standard fixture, see the module header
    pub fn with_fixture(today: NaiveDate) -> Result<Self, String> {
        let env = Self::new(today)?;
        env.seed_fixture().map_err(|e| format!("cannot seed fixture: {}", e))?;
        Ok(env)
    }

    fn seed_fixture(&self) -> Result<(), Box<dyn std::error::Error>> {
        let state = &self.state;

        state.period_repo.upsert(&AcademicPeriodBuilder::new(YEAR).build())?;

        let clubs = [
            ClubBuilder::new("club-01", 1).weekday(Weekday::Wednesday).build(),
            ClubBuilder::new("club-04", 4).weekday(Weekday::Wednesday).build(),
            ClubBuilder::new("club-09", 9).weekday(Weekday::Saturday).build(),
            ClubBuilder::new("club-02", 2).inactive().build(),
            ClubBuilder::new("club-07", 7).no_weekday().build(),
        ];
        for club in &clubs {
            state.club_repo.insert_club(club)?;
        }

        let children = [
            ("ana", "club-01"),
            ("bia", "club-01"),
            ("caio", "club-04"),
            ("davi", "club-04"),
            ("enzo", "club-09"),
            ("gabi", "club-02"),
            ("hugo", "club-07"),
        ];
        for (id, club_id) in children {
            state
                .club_repo
                .insert_child(&ChildBuilder::new(id).club(club_id).build())?;
        }

        // week 5 Wednesday
        for child_id in ["ana", "bia", "caio"] {
            state
                .pagela_repo
                .create(PagelaBuilder::new(child_id, date(2024, 3, 6)).build())?;
        }

        Ok(())
    }

    /// Register an active exception
    pub fn add_exception(&self, day: NaiveDate, reason: &str) -> Result<(), String> {
        self.state
            .exception_repo
            .insert(ExceptionBuilder::new(day, reason).build())
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
