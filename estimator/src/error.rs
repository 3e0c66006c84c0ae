//! Error types for the bedtime estimator.

use thiserror::Error;

/// Result type for estimator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the estimator.
///
/// Only [`Error::PredictionUnavailable`] can come out of an estimate. The
/// input variants are raised while building [`crate::SleepInputs`], before
/// the model is ever consulted.
#[derive(Error, Debug)]
pub enum Error {
    /// Hour or minute outside a 24-hour clock, or an unparsable `HH:MM`
    #[error("Invalid wake time: {0}")]
    InvalidWakeTime(String),

    #[error("Sleep amount must be between 4 and 12 hours, got {0}")]
    SleepAmountOutOfRange(f64),

    #[error("Coffee amount must be between 1 and 20 cups, got {0}")]
    CoffeeAmountOutOfRange(u32),

    /// The model could not be loaded or faulted while predicting
    #[error("Bedtime prediction unavailable: {0}")]
    PredictionUnavailable(#[from] ModelError),

    #[error("Time formatting failed: {0}")]
    Format(#[from] time::error::Format),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for the one failure the estimation boundary can produce.
    pub fn is_prediction_unavailable(&self) -> bool {
        matches!(self, Error::PredictionUnavailable(_))
    }
}

/// Faults raised while loading or invoking a regression model.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Artifact missing or unreadable
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Malformed model artifact: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Artifact parsed but declares a format or kind this crate cannot run
    #[error("Unsupported model artifact: {0}")]
    Unsupported(String),

    /// Model was loaded but the invocation itself faulted
    #[error("Prediction failure: {0}")]
    PredictionFailure(String),
}

impl ModelError {
    /// Whether the fault happened before the model could be invoked.
    pub fn is_load_failure(&self) -> bool {
        !matches!(self, ModelError::PredictionFailure(_))
    }
}
