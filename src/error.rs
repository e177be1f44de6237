use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid log level: {0}")]
    InvalidLogLevel(String),
    #[error("invalid utc offset: {0} minutes")]
    InvalidUtcOffset(i32),
}
