// ==========================================
// Club Attendance - application layer
// ==========================================
// Wiring of repositories, config, clock and API
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState};
