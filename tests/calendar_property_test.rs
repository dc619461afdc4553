// ==========================================
// AcademicCalendar property tests
// ==========================================
// Exhaustive sweeps over periods starting on every weekday, including
// periods that cross the calendar-year boundary.
// ==========================================

mod helpers;

use chrono::{Datelike, Duration, NaiveDate};
use club_attendance::domain::types::Weekday;
use club_attendance::domain::{AcademicPeriod, CalendarError};
use club_attendance::engine::AcademicCalendar;
use helpers::test_data_builder::{date, AcademicPeriodBuilder};

/// Periods starting Monday 2024-02-05 .. Sunday 2024-02-11, plus one
/// August-to-July period
fn sample_periods() -> Vec<AcademicPeriod> {
    let mut periods: Vec<AcademicPeriod> = (0..7)
        .map(|offset| {
            AcademicPeriodBuilder::new(2024)
                .start_date(date(2024, 2, 5) + Duration::days(offset))
                .build()
        })
        .collect();
    periods.push(
        AcademicPeriodBuilder::new(2024)
            .start_date(date(2024, 8, 7))
            .end_date(date(2025, 7, 4))
            .build(),
    );
    periods
}

fn every_day(period: &AcademicPeriod) -> impl Iterator<Item = NaiveDate> + '_ {
    period
        .start_date
        .iter_days()
        .take_while(move |d| *d <= period.end_date)
}

#[test]
fn test_week_numbers_are_monotonic_and_step_on_mondays() {
    for period in sample_periods() {
        let mut previous: Option<(NaiveDate, u32)> = None;
        for day in every_day(&period) {
            let week = AcademicCalendar::academic_week(&period, day).unwrap();
            assert!(week >= 1);
            if let Some((prev_day, prev_week)) = previous {
                if day.weekday() == chrono::Weekday::Mon {
                    assert_eq!(week, prev_week + 1, "{} after {}", day, prev_day);
                } else {
                    assert_eq!(week, prev_week, "{} after {}", day, prev_day);
                }
            }
            previous = Some((day, week));
        }
        let (_, last_week) = previous.unwrap();
        assert_eq!(last_week, AcademicCalendar::max_week(&period));
    }
}

#[test]
fn test_first_day_is_week_one() {
    for period in sample_periods() {
        assert_eq!(AcademicCalendar::academic_week(&period, period.start_date).unwrap(), 1);
    }
}

#[test]
fn test_expected_date_lands_on_weekday_inside_week() {
    for period in sample_periods() {
        for week in 1..=AcademicCalendar::max_week(&period) {
            let (monday, sunday) = AcademicCalendar::week_range(&period, week).unwrap();
            assert_eq!(monday.weekday(), chrono::Weekday::Mon);
            assert_eq!(sunday - monday, Duration::days(6));

            for weekday in Weekday::ALL {
                let expected = AcademicCalendar::expected_date(&period, week, weekday).unwrap();
                assert!(monday <= expected && expected <= sunday);
                assert_eq!(expected.weekday().num_days_from_monday(), weekday.days_from_monday());

                // week number round-trips whenever the date is inside the period
                if period.contains(expected) {
                    assert_eq!(AcademicCalendar::academic_week(&period, expected).unwrap(), week);
                }
            }
        }
    }
}

#[test]
fn test_weeks_outside_range_are_rejected() {
    for period in sample_periods() {
        let max_week = AcademicCalendar::max_week(&period);
        assert!(matches!(
            AcademicCalendar::expected_date(&period, 0, Weekday::Monday),
            Err(CalendarError::WeekOutOfPeriod { .. })
        ));
        assert!(matches!(
            AcademicCalendar::expected_date(&period, max_week + 1, Weekday::Monday),
            Err(CalendarError::WeekOutOfPeriod { .. })
        ));
    }
}

#[test]
fn test_dates_outside_period_have_no_week() {
    for period in sample_periods() {
        let before = period.start_date - Duration::days(1);
        let after = period.end_date + Duration::days(1);
        assert!(AcademicCalendar::academic_week(&period, before).is_err());
        assert!(AcademicCalendar::academic_week(&period, after).is_err());
        assert_eq!(AcademicCalendar::current_week(&period, after), None);
    }
}

#[test]
fn test_locate_crosses_year_boundary() {
    let periods = vec![
        AcademicPeriodBuilder::new(2024)
            .start_date(date(2024, 8, 5))
            .end_date(date(2025, 6, 27))
            .build(),
        AcademicPeriodBuilder::new(2025)
            .start_date(date(2025, 8, 4))
            .end_date(date(2026, 6, 26))
            .build(),
    ];

    let (period, week) = AcademicCalendar::locate(&periods, date(2025, 1, 8)).unwrap();
    assert_eq!(period.year, 2024);
    assert_eq!(week, 23);

    let (period, week) = AcademicCalendar::locate(&periods, date(2025, 8, 6)).unwrap();
    assert_eq!(period.year, 2025);
    assert_eq!(week, 1);

    // summer gap
    assert!(AcademicCalendar::locate(&periods, date(2025, 7, 15)).is_none());
}

#[test]
fn test_locate_ignores_inactive_periods() {
    let periods = vec![AcademicPeriodBuilder::new(2024).inactive().build()];
    assert!(AcademicCalendar::locate(&periods, date(2024, 3, 6)).is_none());
}

#[test]
fn test_weeks_between_is_clamped_to_period() {
    let period = AcademicPeriodBuilder::new(2024).build();
    let max_week = AcademicCalendar::max_week(&period);

    let all = AcademicCalendar::weeks_between(&period, date(2023, 1, 1), date(2025, 1, 1));
    assert_eq!(all, (1..=max_week).collect::<Vec<_>>());

    assert!(AcademicCalendar::weeks_between(&period, date(2024, 5, 1), date(2024, 4, 1)).is_empty());
}
