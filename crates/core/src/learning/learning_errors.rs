use thiserror::Error;

/// Custom error type for course/lesson-related operations
#[derive(Debug, Error)]
pub enum LearningError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Not authorized: {0}")]
    NotAuthorized(String),
    #[error("Unknown content type: {0}")]
    UnknownContentType(String),
}

impl From<LearningError> for String {
    fn from(error: LearningError) -> Self {
        error.to_string()
    }
}
