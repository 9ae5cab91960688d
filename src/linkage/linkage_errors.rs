use diesel::result::Error as DieselError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LinkageError>;

/// Custom error type for shift/delivery linkage maintenance
#[derive(Debug, Error)]
pub enum LinkageError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Delivery does not fit within shift time")]
    OutsideWindow,
    #[error("Delivery app does not match shift app")]
    AppMismatch,
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<DieselError> for LinkageError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => LinkageError::NotFound("Linkage row not found".to_string()),
            _ => LinkageError::DatabaseError(err.to_string()),
        }
    }
}
