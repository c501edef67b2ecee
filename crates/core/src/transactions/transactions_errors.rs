use thiserror::Error;

/// Custom error type for transaction-related operations
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Unknown transaction kind: {0}")]
    UnknownKind(String),
}

impl From<TransactionError> for String {
    fn from(error: TransactionError) -> Self {
        error.to_string()
    }
}
