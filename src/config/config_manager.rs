// ==========================================
// Club Attendance - config manager
// ==========================================
// Reads and writes the config_kv table (scope_id = 'global').
// Missing or unparsable values fall back to built-in defaults.
// ==========================================

use crate::config::attendance_config_trait::AttendanceConfigReader;
use crate::db::open_sqlite_connection;
use crate::engine::report::AlertThresholds;
use crate::engine::status::AttendanceThresholds;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::json;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tracing::warn;

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// # Arguments
    /// - db_path: database file path
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share an existing connection.
    ///
    /// Re-applies the connection PRAGMAs (idempotent).
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Read a global config value
    ///
    /// # Returns
    /// - Some(String): stored value
    /// - None: key not set
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    /// Upsert a global config value
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at) VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value],
        )?;
        Ok(())
    }

    /// All global values as a JSON object string
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let config_map = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)))?
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        serde_json::to_string(&json!(config_map))
            .map_err(|e| RepositoryError::InternalError(e.to_string()))
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// Parse a value, logging and falling back to `default` when malformed
    fn get_parsed<T: FromStr + Copy>(&self, key: &str, default: T) -> RepositoryResult<T> {
        match self.get_global_config_value(key)? {
            None => Ok(default),
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(value) => Ok(value),
                Err(_) => {
                    warn!(key, value = %raw, "unparsable config value, using default");
                    Ok(default)
                }
            },
        }
    }
}

#[async_trait]
impl AttendanceConfigReader for ConfigManager {
    async fn get_attendance_thresholds(&self) -> RepositoryResult<AttendanceThresholds> {
        let defaults = AttendanceThresholds::default();
        let high = self.get_parsed(config_keys::PARTIAL_URGENCY_HIGH_PCT, defaults.urgency_high_pct)?;
        let medium =
            self.get_parsed(config_keys::PARTIAL_URGENCY_MEDIUM_PCT, defaults.urgency_medium_pct)?;

        if medium > high {
            warn!(high, medium, "medium urgency threshold above high, using defaults");
            return Ok(defaults);
        }
        Ok(AttendanceThresholds {
            urgency_high_pct: high,
            urgency_medium_pct: medium,
        })
    }

    async fn get_alert_thresholds(&self) -> RepositoryResult<AlertThresholds> {
        let defaults = AlertThresholds::default();
        Ok(AlertThresholds {
            consecutive_missing_weeks: self.get_parsed(
                config_keys::ALERT_CONSECUTIVE_MISSING_WEEKS,
                defaults.consecutive_missing_weeks,
            )?,
            low_attendance_rate_pct: self.get_parsed(
                config_keys::ALERT_LOW_ATTENDANCE_RATE_PCT,
                defaults.low_attendance_rate_pct,
            )?,
        })
    }

    async fn get_default_page_size(&self) -> RepositoryResult<usize> {
        let value = self.get_parsed(config_keys::DEFAULT_PAGE_SIZE, 20usize)?;
        Ok(value.max(1))
    }

    async fn get_max_page_size(&self) -> RepositoryResult<usize> {
        let value = self.get_parsed(config_keys::MAX_PAGE_SIZE, 100usize)?;
        Ok(value.max(1))
    }

    async fn get_locale(&self) -> RepositoryResult<String> {
        let value = self.get_config_or_default(config_keys::LOCALE, "pt-BR")?;
        match value.trim() {
            "en" | "pt-BR" => Ok(value.trim().to_string()),
            other => {
                warn!(locale = other, "unsupported locale, using pt-BR");
                Ok("pt-BR".to_string())
            }
        }
    }
}

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    // Partial-week urgency
    pub const PARTIAL_URGENCY_HIGH_PCT: &str = "partial_urgency_high_pct";
    pub const PARTIAL_URGENCY_MEDIUM_PCT: &str = "partial_urgency_medium_pct";

    // Paging
    pub const DEFAULT_PAGE_SIZE: &str = "default_page_size";
    pub const MAX_PAGE_SIZE: &str = "max_page_size";

    // Club timeline alerts
    pub const ALERT_CONSECUTIVE_MISSING_WEEKS: &str = "alert_consecutive_missing_weeks";
    pub const ALERT_LOW_ATTENDANCE_RATE_PCT: &str = "alert_low_attendance_rate_pct";

    // Messages
    pub const LOCALE: &str = "locale";
}
