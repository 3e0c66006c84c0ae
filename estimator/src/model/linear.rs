//! Linear sleep regressor and its JSON artifact format.
//!
//! Formula: `actual_sleep = intercept + wake * w_wake + estimatedSleep * w_sleep + coffee * w_coffee`
//!
//! Artifacts name their features after the original `SleepCalculator` model
//! (`wake`, `estimatedSleep`, `coffee`). Older exports predict seconds rather
//! than hours; `output_unit` records which, and predictions are always
//! returned in hours.

use serde::{Deserialize, Serialize};

use super::RegressionModel;
use crate::core::inputs::{Features, SECONDS_PER_HOUR};
use crate::error::ModelError;

/// Artifact layout version understood by this crate.
pub const ARTIFACT_FORMAT: u32 = 1;

const LINEAR_KIND: &str = "linear";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputUnit {
    #[default]
    Hours,
    Seconds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coefficients {
    /// Per second since midnight.
    pub wake: f64,
    /// Per desired hour of sleep.
    pub estimated_sleep: f64,
    /// Per cup.
    pub coffee: f64,
}

/// On-disk representation of a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format: u32,
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub output_unit: OutputUnit,
    pub intercept: f64,
    pub coefficients: Coefficients,
}

/// Immutable linear model. Never mutated once built.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRegressor {
    name: String,
    intercept: f64,
    coefficients: Coefficients,
    output_unit: OutputUnit,
}

impl LinearRegressor {
    /// A regressor predicting hours directly.
    pub fn new(intercept: f64, coefficients: Coefficients) -> Self {
        Self {
            name: "linear".to_string(),
            intercept,
            coefficients,
            output_unit: OutputUnit::Hours,
        }
    }

    pub fn from_json(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)?;
        Self::from_artifact(artifact)
    }

    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self, ModelError> {
        if artifact.format != ARTIFACT_FORMAT {
            return Err(ModelError::Unsupported(format!(
                "format {} (expected {})",
                artifact.format, ARTIFACT_FORMAT
            )));
        }
        if artifact.kind != LINEAR_KIND {
            return Err(ModelError::Unsupported(format!("kind {:?}", artifact.kind)));
        }

        let c = &artifact.coefficients;
        let all_finite = [artifact.intercept, c.wake, c.estimated_sleep, c.coffee]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ModelError::Unsupported(format!(
                "{} has non-finite coefficients",
                artifact.name
            )));
        }

        Ok(Self {
            name: artifact.name,
            intercept: artifact.intercept,
            coefficients: artifact.coefficients,
            output_unit: artifact.output_unit,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn coefficients(&self) -> &Coefficients {
        &self.coefficients
    }

    pub fn output_unit(&self) -> OutputUnit {
        self.output_unit
    }
}

impl RegressionModel for LinearRegressor {
    fn predict(&self, features: &Features) -> Result<f64, ModelError> {
        let c = &self.coefficients;
        let raw = self.intercept
            + c.wake * features.wake_seconds
            + c.estimated_sleep * features.sleep_amount
            + c.coffee * features.coffee_amount;

        let hours = match self.output_unit {
            OutputUnit::Hours => raw,
            OutputUnit::Seconds => raw / SECONDS_PER_HOUR,
        };

        if hours.is_finite() {
            Ok(hours)
        } else {
            Err(ModelError::PredictionFailure(format!(
                "{} produced a non-finite value",
                self.name
            )))
        }
    }
}
