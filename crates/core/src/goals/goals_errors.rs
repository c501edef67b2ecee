use thiserror::Error;

/// Custom error type for goal-related operations
#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Unknown goal status: {0}")]
    UnknownStatus(String),
}

impl From<GoalError> for String {
    fn from(error: GoalError) -> Self {
        error.to_string()
    }
}
