use diesel::result::Error as DieselError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ShiftError>;

/// Custom error type for shift-related operations
#[derive(Debug, Error)]
pub enum ShiftError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for ShiftError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => ShiftError::NotFound("Shift not found".to_string()),
            _ => ShiftError::DatabaseError(err.to_string()),
        }
    }
}
