use diesel::result::Error as DieselError;
use thiserror::Error;

/// Custom error type for goal operations
#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Goal {0} not found.")]
    NotFound(i32),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<DieselError> for GoalError {
    fn from(err: DieselError) -> Self {
        GoalError::DatabaseError(err.to_string())
    }
}

/// Result type for goal operations
pub type Result<T> = std::result::Result<T, GoalError>;
