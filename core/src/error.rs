use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid day window: days must be positive, got {days}")]
    InvalidDayWindow { days: u32 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type AnalyticsResult<T> = Result<T, AnalyticsError>;
