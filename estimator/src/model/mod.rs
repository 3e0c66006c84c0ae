//! Regression model seam and artifact loading.
//!
//! The estimator only ever talks to [`RegressionModel`]. Artifacts are loaded
//! once and shared behind an `Arc`; the embedded `SleepCalculator.json` is
//! cached process-wide on first use.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use rust_embed::Embed;

use crate::core::inputs::Features;
use crate::error::ModelError;

pub mod linear;

pub use linear::{Coefficients, LinearRegressor, ModelArtifact, OutputUnit};

/// File name of the embedded artifact.
pub const BUNDLED_MODEL: &str = "SleepCalculator.json";

/// A trained model mapping one feature tuple to predicted required sleep.
pub trait RegressionModel: Send + Sync + fmt::Debug {
    /// Predicted hours of sleep actually needed. One tuple in, one scalar out.
    fn predict(&self, features: &Features) -> Result<f64, ModelError>;
}

/// Artifacts shipped inside the crate.
#[derive(Embed)]
#[folder = "models"]
struct BundledModels;

/// Where an artifact is read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelSource {
    #[default]
    Bundled,
    Path(PathBuf),
}

impl ModelSource {
    /// Read and validate the artifact. Every call hits storage.
    pub fn load(&self) -> Result<LinearRegressor, ModelError> {
        let model = match self {
            ModelSource::Bundled => {
                let file = BundledModels::get(BUNDLED_MODEL).ok_or_else(|| {
                    ModelError::ModelUnavailable(format!("{BUNDLED_MODEL} is not embedded"))
                })?;
                LinearRegressor::from_json(&file.data)?
            }
            ModelSource::Path(path) => {
                let bytes = fs::read(path).map_err(|e| {
                    ModelError::ModelUnavailable(format!("{}: {}", path.display(), e))
                })?;
                LinearRegressor::from_json(&bytes)?
            }
        };

        log::info!("Loaded sleep model '{}' from {}", model.name(), self);
        Ok(model)
    }
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSource::Bundled => write!(f, "bundled {BUNDLED_MODEL}"),
            ModelSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

static BUNDLED: OnceCell<Arc<LinearRegressor>> = OnceCell::new();

/// Process-wide copy of the embedded model. A failed load is not cached.
pub fn bundled() -> Result<Arc<LinearRegressor>, ModelError> {
    BUNDLED
        .get_or_try_init(|| ModelSource::Bundled.load().map(Arc::new))
        .cloned()
}

/// Defers loading to the first prediction.
///
/// While the artifact cannot be loaded every prediction fails with the load
/// error and the next one tries again; after a successful load the model is
/// kept for the life of this value.
#[derive(Debug)]
pub struct LazyModel {
    source: ModelSource,
    loaded: OnceCell<LinearRegressor>,
}

impl LazyModel {
    pub fn new(source: ModelSource) -> Self {
        Self {
            source,
            loaded: OnceCell::new(),
        }
    }

    pub fn source(&self) -> &ModelSource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.get().is_some()
    }
}

impl RegressionModel for LazyModel {
    fn predict(&self, features: &Features) -> Result<f64, ModelError> {
        self.loaded
            .get_or_try_init(|| self.source.load())?
            .predict(features)
    }
}
