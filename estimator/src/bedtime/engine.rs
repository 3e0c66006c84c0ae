//! Bedtime estimation: model prediction followed by clock arithmetic.

use std::sync::Arc;

use crate::core::config::EstimatorConfig;
use crate::core::inputs::{Features, SleepInputs, WakeTime};
use crate::core::timing::hours_before;
use crate::error::{ModelError, Result};
use crate::model::{self, LazyModel, ModelSource, RegressionModel};

use super::outcome::Bedtime;

/// Holds a loaded model and turns inputs into bedtimes.
///
/// Cheap to clone; clones share the same read-only model. Each call to
/// [`SleepEstimator::estimate`] is independent and has no side effects.
#[derive(Debug, Clone)]
pub struct SleepEstimator {
    model: Arc<dyn RegressionModel>,
}

impl SleepEstimator {
    pub fn new(model: Arc<dyn RegressionModel>) -> Self {
        Self { model }
    }

    /// Estimator over the embedded `SleepCalculator` artifact.
    pub fn bundled() -> Result<Self> {
        let model: Arc<dyn RegressionModel> = model::bundled()?;
        Ok(Self::new(model))
    }

    /// Load the artifact on the first estimate instead of now. Load
    /// failures then surface per call as `PredictionUnavailable`.
    pub fn lazy(source: ModelSource) -> Self {
        Self::new(Arc::new(LazyModel::new(source)))
    }

    /// Load the configured artifact eagerly; failure is a startup error.
    pub fn from_config(config: &EstimatorConfig) -> Result<Self> {
        match config.model.source() {
            ModelSource::Bundled => Self::bundled(),
            source => {
                let model = source.load()?;
                Ok(Self::new(Arc::new(model)))
            }
        }
    }

    pub fn estimate(&self, inputs: &SleepInputs) -> Result<Bedtime> {
        self.estimate_features(inputs.wake, &inputs.features())
    }

    /// Estimate from an already normalized feature tuple.
    pub fn estimate_features(&self, wake: WakeTime, features: &Features) -> Result<Bedtime> {
        let hours = self.model.predict(features)?;

        if !hours.is_finite() || hours < 0.0 {
            return Err(ModelError::PredictionFailure(format!(
                "required sleep must be a non-negative number of hours, got {hours}"
            ))
            .into());
        }

        Ok(Bedtime {
            time: hours_before(wake.time(), hours),
            required_sleep_hours: hours,
            wake,
        })
    }
}
