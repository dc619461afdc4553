// ==========================================
// Club Attendance - configuration layer
// ==========================================
// Storage: config_kv table (global scope)
// ==========================================

pub mod attendance_config_trait;
pub mod config_manager;

pub use attendance_config_trait::AttendanceConfigReader;
pub use config_manager::{config_keys, ConfigManager};
