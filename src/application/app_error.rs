use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("invalid or expired access link")]
    NotFound,

    #[error("invalid passcode, please try again")]
    PasscodeMismatch,

    #[error("email dispatch failed: {0}")]
    Dispatch(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("access not granted")]
    AccessDenied,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::Database(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
