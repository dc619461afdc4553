// ==========================================
// Club Attendance - API error types
// ==========================================
// Converts repository and calendar errors into caller-facing errors.
// Every message carries an explicit reason.
// ==========================================

use crate::domain::error::CalendarError;
use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Request errors
    // ==========================================
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// Stored data breaks a calendar invariant (e.g. unknown weekday)
    #[error("data invariant violated: {0}")]
    InvariantViolation(String),

    #[error("business rule violated: {0}")]
    BusinessRuleViolation(String),

    #[error("validation failed: {0}")]
    ValidationError(String),

    // ==========================================
    // Data access
    // ==========================================
    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("database connection failed: {0}")]
    DatabaseConnectionError(String),

    #[error("database transaction failed: {0}")]
    DatabaseTransactionError(String),

    // ==========================================
    // Generic
    // ==========================================
    #[error("internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// From RepositoryError
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{} (id={}) does not exist", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::DatabaseTransactionError(msg) => {
                ApiError::DatabaseTransactionError(msg)
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("failed to acquire database lock: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("unique constraint violated: {}", msg))
            }
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::BusinessRuleViolation(format!("foreign key constraint violated: {}", msg))
            }
            RepositoryError::ValidationError(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } if field == "weekday" => {
                ApiError::InvariantViolation(message)
            }
            RepositoryError::FieldValueError { field, message } => {
                ApiError::InvalidInput(format!("field {}: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// From CalendarError
// ==========================================
impl From<CalendarError> for ApiError {
    fn from(err: CalendarError) -> Self {
        match err {
            CalendarError::InvalidWeekday(_) => ApiError::InvariantViolation(err.to_string()),
            CalendarError::WeekOutOfPeriod { .. } | CalendarError::DateOutOfPeriod { .. } => {
                ApiError::InvalidInput(err.to_string())
            }
            CalendarError::InvalidPeriod { .. } => ApiError::ValidationError(err.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// Input validation helpers
// ==========================================

/// Academic weeks are 1-based
pub fn validate_week(week: u32) -> ApiResult<()> {
    if week == 0 {
        return Err(ApiError::InvalidInput("week must be >= 1".to_string()));
    }
    Ok(())
}

pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> ApiResult<()> {
    if start > end {
        return Err(ApiError::InvalidInput(format!(
            "start date {} is after end date {}",
            start, end
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::NotFound {
            entity: "Club".to_string(),
            id: "C001".to_string(),
        }
        .into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Club"));
                assert!(msg.contains("C001"));
            }
            _ => panic!("Expected NotFound"),
        }

        let api_err: ApiError = RepositoryError::FieldValueError {
            field: "weekday".to_string(),
            message: "club C001: unrecognized weekday".to_string(),
        }
        .into();
        assert!(matches!(api_err, ApiError::InvariantViolation(_)));
    }

    #[test]
    fn test_calendar_error_conversion() {
        let api_err: ApiError = CalendarError::InvalidWeekday("funday".to_string()).into();
        assert!(matches!(api_err, ApiError::InvariantViolation(_)));

        let api_err: ApiError = CalendarError::WeekOutOfPeriod {
            year: 2024,
            week: 60,
            max_week: 45,
        }
        .into();
        assert!(matches!(api_err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_validation_helpers() {
        assert!(validate_week(0).is_err());
        assert!(validate_week(1).is_ok());

        let a = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let b = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        assert!(validate_date_range(b, a).is_ok());
        assert!(matches!(validate_date_range(a, b), Err(ApiError::InvalidInput(_))));
    }
}
