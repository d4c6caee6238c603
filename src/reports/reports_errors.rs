use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for the reporting engine
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for ReportError {
    fn from(err: DieselError) -> Self {
        ReportError::DatabaseError(err.to_string())
    }
}

/// Result type for reporting operations
pub type Result<T> = std::result::Result<T, ReportError>;
