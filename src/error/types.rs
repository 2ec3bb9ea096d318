// src/error/types.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid patch name template: {0}")]
    Template(String),
}

pub type AppResult<T> = Result<T, AppError>;
