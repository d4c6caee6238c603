use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for activity-log operations
#[derive(Debug, Error)]
pub enum ActivityError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for ActivityError {
    fn from(err: DieselError) -> Self {
        ActivityError::DatabaseError(err.to_string())
    }
}

/// Result type for activity-log operations
pub type Result<T> = std::result::Result<T, ActivityError>;
