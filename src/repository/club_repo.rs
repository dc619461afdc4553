// ==========================================
// Club Attendance - club and child repository
// ==========================================
// Tables: club, child
// Clubs and children are maintained by the external registration
// screens; this repository reads them and offers minimal writes for
// seeding and tests.
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::club::{Child, Club};
use crate::domain::types::Weekday;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex};

const CLUB_COLUMNS: &str = "club_id, number, weekday, active";
const CHILD_COLUMNS: &str = "child_id, name, club_id, active, joined_date";

/// Club row before weekday validation
struct ClubRow {
    id: String,
    number: i32,
    weekday: Option<String>,
    active: bool,
}

impl ClubRow {
    fn read(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            number: row.get(1)?,
            weekday: row.get(2)?,
            active: row.get(3)?,
        })
    }

    /// Blank weekday = unscheduled; anything unrecognized is an error
    fn into_club(self) -> RepositoryResult<Club> {
        let weekday = match self.weekday.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(Weekday::parse(raw).map_err(|e| RepositoryError::FieldValueError {
                field: "weekday".to_string(),
                message: format!("club {}: {}", self.id, e),
            })?),
        };
        Ok(Club {
            id: self.id,
            number: self.number,
            weekday,
            active: self.active,
        })
    }
}

fn map_child_row(row: &Row<'_>) -> rusqlite::Result<Child> {
    Ok(Child {
        id: row.get(0)?,
        name: row.get(1)?,
        club_id: row.get(2)?,
        active: row.get(3)?,
        joined_date: row.get(4)?,
    })
}

pub(crate) fn query_clubs(conn: &Connection) -> RepositoryResult<Vec<Club>> {
    let sql = format!("SELECT {} FROM club ORDER BY number", CLUB_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], ClubRow::read)?
        .collect::<Result<Vec<_>, _>>()?;
    rows.into_iter().map(ClubRow::into_club).collect()
}

/// Children that belong to some club
pub(crate) fn query_club_children(conn: &Connection) -> RepositoryResult<Vec<Child>> {
    let sql = format!(
        "SELECT {} FROM child WHERE club_id IS NOT NULL ORDER BY name",
        CHILD_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let children = stmt
        .query_map([], map_child_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(children)
}

pub struct ClubRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ClubRepository {
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

    pub fn find_by_id(&self, club_id: &str) -> RepositoryResult<Option<Club>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM club WHERE club_id = ?1", CLUB_COLUMNS);
        let row = conn.query_row(&sql, params![club_id], ClubRow::read).optional()?;
        row.map(ClubRow::into_club).transpose()
    }

    /// All clubs ordered by number
    pub fn list_all(&self) -> RepositoryResult<Vec<Club>> {
        let conn = self.get_conn()?;
        query_clubs(&conn)
    }

    pub fn list_children(&self, club_id: &str) -> RepositoryResult<Vec<Child>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM child WHERE club_id = ?1 ORDER BY name", CHILD_COLUMNS);
        let mut stmt = conn.prepare(&sql)?;
        let children = stmt
            .query_map(params![club_id], map_child_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(children)
    }

    pub fn insert_club(&self, club: &Club) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO club (club_id, number, weekday, active) VALUES (?1, ?2, ?3, ?4)",
            params![
                club.id,
                club.number,
                club.weekday.map(|w| w.to_db_str()),
                club.active,
            ],
        )?;
        Ok(())
    }

    pub fn insert_child(&self, child: &Child) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO child (child_id, name, club_id, active, joined_date) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![child.id, child.name, child.club_id, child.active, child.joined_date],
        )?;
        Ok(())
    }

    pub fn set_child_active(&self, child_id: &str, active: bool) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let changed = conn.execute(
            "UPDATE child SET active = ?2 WHERE child_id = ?1",
            params![child_id, active],
        )?;
        if changed == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Child".to_string(),
                id: child_id.to_string(),
            });
        }
        Ok(())
    }
}
