// ==========================================
// Club Attendance - pagela repository
// ==========================================
// Table: pagela, UNIQUE(child_id, year, week)
// Year/week are derived from reference_date through the covering
// academic period (own year, then year-1, then year+1).
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::pagela::{NewPagela, Pagela};
use crate::engine::calendar::AcademicCalendar;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::period_repo;
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use uuid::Uuid;

const PAGELA_COLUMNS: &str =
    "p.pagela_id, p.child_id, p.year, p.week, p.reference_date, p.present, p.did_meditation, p.recited_verse, p.notes";

fn map_pagela_row(row: &Row<'_>) -> rusqlite::Result<Pagela> {
    Ok(Pagela {
        id: row.get(0)?,
        child_id: row.get(1)?,
        year: row.get(2)?,
        week: row.get(3)?,
        reference_date: row.get(4)?,
        present: row.get(5)?,
        did_meditation: row.get(6)?,
        recited_verse: row.get(7)?,
        notes: row.get(8)?,
    })
}

pub(crate) fn query_by_year(conn: &Connection, year: i32) -> RepositoryResult<Vec<Pagela>> {
    let sql = format!(
        "SELECT {} FROM pagela p WHERE p.year = ?1 ORDER BY p.week, p.child_id",
        PAGELA_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let pagelas = stmt
        .query_map(params![year], map_pagela_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(pagelas)
}

pub struct PagelaRepository {
    conn: Arc<Mutex<Connection>>,
}

impl PagelaRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn list_by_year(&self, year: i32) -> RepositoryResult<Vec<Pagela>> {
        let conn = self.get_conn()?;
        query_by_year(&conn, year)
    }

    /// Pagelas of the children currently in `club_id`
    pub fn list_by_club_year(&self, club_id: &str, year: i32) -> RepositoryResult<Vec<Pagela>> {
        let conn = self.get_conn()?;
        let sql = format!(
            r#"
            SELECT {}
            FROM pagela p
            JOIN child c ON c.child_id = p.child_id
            WHERE c.club_id = ?1 AND p.year = ?2
            ORDER BY p.week, p.child_id
            "#,
            PAGELA_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let pagelas = stmt
            .query_map(params![club_id, year], map_pagela_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(pagelas)
    }

    /// Record a pagela.
    ///
    /// # Rules
    /// - year/week come from the period covering reference_date
    /// - explicit year/week must match that period's numbering
    /// - without a covering period both year and week must be given
    ///
    /// # Errors
    /// - `ValidationError` for a mismatch or missing year/week
    /// - `UniqueConstraintViolation` when the child already has a pagela that week
    /// - `ForeignKeyViolation` for an unknown child
    pub fn create(&self, input: NewPagela) -> RepositoryResult<Pagela> {
        let conn = self.get_conn()?;
        let periods = period_repo::query_active(&conn)?;

        let (year, week) = match AcademicCalendar::locate(&periods, input.reference_date) {
            Some((period, week)) => {
                let derived = (period.year, week);
                if input.year.is_some_and(|y| y != derived.0)
                    || input.week.is_some_and(|w| w != derived.1)
                {
                    return Err(RepositoryError::ValidationError(format!(
                        "reference date {} is week {} of {}, got {:?}/{:?}",
                        input.reference_date, derived.1, derived.0, input.week, input.year
                    )));
                }
                derived
            }
            None => match (input.year, input.week) {
                (Some(year), Some(week)) if week > 0 => {
                    debug!(reference_date = %input.reference_date, year, week, "no covering period, using explicit week");
                    (year, week)
                }
                _ => {
                    return Err(RepositoryError::ValidationError(format!(
                        "no academic period covers {} and no explicit year/week was given",
                        input.reference_date
                    )))
                }
            },
        };

        let pagela = Pagela {
            id: Uuid::new_v4().to_string(),
            child_id: input.child_id,
            year,
            week,
            reference_date: input.reference_date,
            present: input.present,
            did_meditation: input.did_meditation,
            recited_verse: input.recited_verse,
            notes: input.notes,
        };

        conn.execute(
            r#"
            INSERT INTO pagela (
                pagela_id, child_id, year, week, reference_date,
                present, did_meditation, recited_verse, notes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
            params![
                pagela.id,
                pagela.child_id,
                pagela.year,
                pagela.week,
                pagela.reference_date,
                pagela.present,
                pagela.did_meditation,
                pagela.recited_verse,
                pagela.notes,
            ],
        )?;

        info!(child_id = %pagela.child_id, year, week, "pagela recorded");
        Ok(pagela)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn setup() -> PagelaRepository {
        let conn = open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            INSERT INTO academic_period (year, start_date, end_date) VALUES (2024, '2024-08-05', '2025-03-30');
            INSERT INTO club (club_id, number, weekday) VALUES ('c1', 1, 'wednesday');
            INSERT INTO child (child_id, name, club_id) VALUES ('k1', 'Ana', 'c1');
            INSERT INTO child (child_id, name, club_id) VALUES ('k2', 'Bia', NULL);
            "#,
        )
        .unwrap();
        PagelaRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    fn input(child: &str, date: NaiveDate) -> NewPagela {
        NewPagela {
            child_id: child.to_string(),
            reference_date: date,
            year: None,
            week: None,
            present: true,
            did_meditation: true,
            recited_verse: false,
            notes: None,
        }
    }

    #[test]
    fn test_week_derived_from_previous_year_period() {
        let repo = setup();
        let pagela = repo.create(input("k1", d(2025, 1, 8))).unwrap();
        assert_eq!(pagela.year, 2024);
        assert_eq!(pagela.week, 23);
        assert_eq!(repo.list_by_club_year("c1", 2024).unwrap(), vec![pagela]);
    }

    #[test]
    fn test_mismatched_explicit_week_is_rejected() {
        let repo = setup();
        let mut bad = input("k1", d(2024, 8, 7));
        bad.week = Some(2);
        assert!(matches!(repo.create(bad), Err(RepositoryError::ValidationError(_))));

        let mut good = input("k1", d(2024, 8, 7));
        good.week = Some(1);
        good.year = Some(2024);
        assert_eq!(repo.create(good).unwrap().week, 1);
    }

    #[test]
    fn test_no_covering_period_requires_explicit_week() {
        let repo = setup();
        assert!(repo.create(input("k1", d(2026, 5, 6))).is_err());

        let mut explicit = input("k1", d(2026, 5, 6));
        explicit.year = Some(2026);
        explicit.week = Some(14);
        let pagela = repo.create(explicit).unwrap();
        assert_eq!((pagela.year, pagela.week), (2026, 14));
    }

    #[test]
    fn test_one_pagela_per_child_week() {
        let repo = setup();
        repo.create(input("k1", d(2024, 8, 7))).unwrap();
        assert!(matches!(
            repo.create(input("k1", d(2024, 8, 9))),
            Err(RepositoryError::UniqueConstraintViolation(_))
        ));
        assert!(matches!(
            repo.create(input("ghost", d(2024, 8, 7))),
            Err(RepositoryError::ForeignKeyViolation(_))
        ));
        // children without a club still record
        repo.create(input("k2", d(2024, 8, 7))).unwrap();
        assert_eq!(repo.list_by_year(2024).unwrap().len(), 2);
    }
}
