//! Estimator configuration file and environment handling.
//!
//! Everything is optional. With no file and no environment variables the
//! estimator runs on the bundled model, the OS language and the stock
//! defaults (07:00, 8 hours, 1 cup).
//!
//! ```toml
//! locale = "fr-FR"
//!
//! [model]
//! path = "/opt/betterrest/SleepCalculator.json"
//!
//! [defaults]
//! wake = "06:30"
//! sleep_hours = 7.5
//! coffee_cups = 2
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::inputs::{CoffeeAmount, SleepAmount, SleepInputs, WakeTime};
use crate::error::{Error, Result};
use crate::model::ModelSource;

/// Overrides `[model] path`.
pub const MODEL_PATH_ENV: &str = "BETTERREST_MODEL_PATH";
/// Overrides `locale`.
pub const LOCALE_ENV: &str = "BETTERREST_LOCALE";

const DEFAULT_FILE_NAME: &str = "betterrest.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// BCP-47 tag; `None` keeps the OS language list.
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub defaults: InputDefaults,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Artifact on disk; `None` selects the artifact embedded in the crate.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ModelSettings {
    pub fn source(&self) -> ModelSource {
        match &self.path {
            Some(path) => ModelSource::Path(path.clone()),
            None => ModelSource::Bundled,
        }
    }
}

/// Initial values handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputDefaults {
    #[serde(default = "default_wake")]
    pub wake: String,
    #[serde(default = "default_sleep_hours")]
    pub sleep_hours: f64,
    #[serde(default = "default_coffee_cups")]
    pub coffee_cups: u32,
}

fn default_wake() -> String {
    WakeTime::default().to_string()
}

fn default_sleep_hours() -> f64 {
    SleepAmount::default().hours()
}

fn default_coffee_cups() -> u32 {
    CoffeeAmount::default().into()
}

impl Default for InputDefaults {
    fn default() -> Self {
        Self {
            wake: default_wake(),
            sleep_hours: default_sleep_hours(),
            coffee_cups: default_coffee_cups(),
        }
    }
}

impl EstimatorConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Read `betterrest.toml` from the first standard location that has one,
    /// fall back to defaults, then apply environment overrides.
    ///
    /// Searched in order: `./betterrest.toml`, `./config/betterrest.toml`.
    pub fn load() -> Result<Self> {
        let search_paths = [
            PathBuf::from(DEFAULT_FILE_NAME),
            PathBuf::from("config").join(DEFAULT_FILE_NAME),
        ];

        let config = match search_paths.iter().find(|p| p.exists()) {
            Some(path) => {
                log::debug!("Reading estimator config from {}", path.display());
                Self::from_file(path)?
            }
            None => {
                log::debug!("No {DEFAULT_FILE_NAME} found; using built-in defaults");
                Self::default()
            }
        };

        Ok(config.with_env())
    }

    /// Apply `BETTERREST_MODEL_PATH` / `BETTERREST_LOCALE`.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = non_blank(MODEL_PATH_ENV) {
            log::debug!("{MODEL_PATH_ENV} overrides model path: {path}");
            self.model.path = Some(PathBuf::from(path));
        }
        if let Some(locale) = non_blank(LOCALE_ENV) {
            log::debug!("{LOCALE_ENV} overrides locale: {locale}");
            self.locale = Some(locale);
        }
        self
    }

    /// Validate `[defaults]` into calculation inputs.
    pub fn default_inputs(&self) -> Result<SleepInputs> {
        Ok(SleepInputs {
            wake: self.defaults.wake.parse()?,
            sleep: SleepAmount::new(self.defaults.sleep_hours)?,
            coffee: CoffeeAmount::new(self.defaults.coffee_cups)?,
        })
    }
}
