//! Bedtime estimation for BetterRest.
//!
//! Three inputs (wake time, desired sleep, daily coffee) are normalized into
//! a feature tuple, run through a pre-trained regression model, and the
//! predicted sleep need is counted back from the wake time. The presentation
//! layer only ever sees a formatted clock time or an [`Error`].
//!
//! ```no_run
//! use estimator::{calculate_bedtime, EstimatorConfig, SleepInputs};
//!
//! let config = EstimatorConfig::load()?;
//! let estimator = estimator::init(&config)?;
//! let inputs = SleepInputs::from_raw(7, 0, 8.0, 1)?;
//! println!("{}", calculate_bedtime(&estimator, &inputs)?);
//! # Ok::<(), estimator::Error>(())
//! ```

pub mod bedtime;
pub mod core;
pub mod error;
pub mod i18n;
pub mod model;

#[cfg(test)]
mod tests;

pub use bedtime::{Bedtime, SleepEstimator};
pub use crate::core::config::EstimatorConfig;
pub use crate::core::format::ClockConvention;
pub use crate::core::inputs::{normalize, CoffeeAmount, Features, SleepAmount, SleepInputs, WakeTime};
pub use error::{Error, ModelError, Result};
pub use model::{LinearRegressor, ModelSource, RegressionModel};

/// Bring up localization and load the configured model once.
///
/// A configured `locale` that is not a valid language tag is an
/// [`Error::Config`].
///
/// A model that cannot be loaded here is a startup failure; callers that
/// prefer to degrade per calculation should use [`SleepEstimator::lazy`].
pub fn init(config: &EstimatorConfig) -> Result<SleepEstimator> {
    i18n::init();
    if let Some(tag) = &config.locale {
        i18n::set_language(tag)?;
    }
    SleepEstimator::from_config(config)
}

/// Estimate and format in the active language's short time format.
///
/// `Ok` always carries a real clock time; every failure comes back as
/// `Err`, never as an empty or placeholder string.
pub fn calculate_bedtime(estimator: &SleepEstimator, inputs: &SleepInputs) -> Result<String> {
    estimator.estimate(inputs)?.format_localized()
}
