// ==========================================
// Club Attendance - attendance config reader trait
// ==========================================
// Read-only configuration the attendance API needs.
// Implemented by ConfigManager (config_kv table).
// ==========================================

use crate::engine::report::AlertThresholds;
use crate::engine::status::AttendanceThresholds;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

#[async_trait]
pub trait AttendanceConfigReader: Send + Sync {
    // ===== Classification =====

    /// Missing-rate tiers for partial weeks
    ///
    /// # Default
    /// - high > 50%, medium > 25%
    async fn get_attendance_thresholds(&self) -> RepositoryResult<AttendanceThresholds>;

    /// Club timeline alert thresholds
    ///
    /// # Default
    /// - 3 consecutive missing weeks, 75% record rate
    async fn get_alert_thresholds(&self) -> RepositoryResult<AlertThresholds>;

    // ===== Paging =====

    /// # Default
    /// - 20
    async fn get_default_page_size(&self) -> RepositoryResult<usize>;

    /// # Default
    /// - 100
    async fn get_max_page_size(&self) -> RepositoryResult<usize>;

    // ===== Presentation =====

    /// Locale of indicator messages ("pt-BR" or "en")
    async fn get_locale(&self) -> RepositoryResult<String>;
}
