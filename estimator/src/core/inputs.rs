//! User inputs and their normalization into the model's feature tuple.
//!
//! Every input type is valid by construction: a [`SleepInputs`] value can
//! always be normalized, so [`normalize`] has no error path. Range checks
//! happen once, when the values are built.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, Time};

use crate::error::{Error, Result};

pub const SECONDS_PER_MINUTE: f64 = 60.0;
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// Clock time-of-day the user wants to wake at (hour and minute only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WakeTime(Time);

impl WakeTime {
    pub fn new(hour: u8, minute: u8) -> Result<Self> {
        Time::from_hms(hour, minute, 0)
            .map(Self)
            .map_err(|err| Error::InvalidWakeTime(err.to_string()))
    }

    pub fn hour(&self) -> u8 {
        self.0.hour()
    }

    pub fn minute(&self) -> u8 {
        self.0.minute()
    }

    /// Wall-clock time with seconds zeroed.
    pub fn time(&self) -> Time {
        self.0
    }

    /// `hour * 3600 + minute * 60`, the scalar the model is trained on.
    pub fn seconds_since_midnight(&self) -> f64 {
        f64::from(self.hour()) * SECONDS_PER_HOUR + f64::from(self.minute()) * SECONDS_PER_MINUTE
    }
}

impl Default for WakeTime {
    /// 07:00
    fn default() -> Self {
        Self(Time::MIDNIGHT + Duration::hours(7))
    }
}

impl From<Time> for WakeTime {
    fn from(time: Time) -> Self {
        let minutes = i64::from(time.hour()) * 60 + i64::from(time.minute());
        Self(Time::MIDNIGHT + Duration::minutes(minutes))
    }
}

// Date and offset are dropped; only the wall-clock reading survives.
impl From<PrimitiveDateTime> for WakeTime {
    fn from(value: PrimitiveDateTime) -> Self {
        value.time().into()
    }
}

impl From<OffsetDateTime> for WakeTime {
    fn from(value: OffsetDateTime) -> Self {
        value.time().into()
    }
}

impl FromStr for WakeTime {
    type Err = Error;

    /// Accepts `H:MM` or `HH:MM`.
    fn from_str(raw: &str) -> Result<Self> {
        Time::parse(raw.trim(), format_description!("[hour padding:none]:[minute]"))
            .map(Self::from)
            .map_err(|e| Error::InvalidWakeTime(format!("expected HH:MM, got {raw:?}: {e}")))
    }
}

impl TryFrom<String> for WakeTime {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<WakeTime> for String {
    fn from(value: WakeTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for WakeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Desired hours of sleep, within `[4.0, 12.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct SleepAmount(f64);

impl SleepAmount {
    pub const MIN: f64 = 4.0;
    pub const MAX: f64 = 12.0;
    /// Stepper increment. Values between steps are still valid.
    pub const STEP: f64 = 0.25;

    pub fn new(hours: f64) -> Result<Self> {
        if hours.is_finite() && (Self::MIN..=Self::MAX).contains(&hours) {
            Ok(Self(hours))
        } else {
            Err(Error::SleepAmountOutOfRange(hours))
        }
    }

    pub fn hours(self) -> f64 {
        self.0
    }

    pub fn step_up(self) -> Self {
        Self((self.0 + Self::STEP).min(Self::MAX))
    }

    pub fn step_down(self) -> Self {
        Self((self.0 - Self::STEP).max(Self::MIN))
    }
}

impl Default for SleepAmount {
    fn default() -> Self {
        Self(8.0)
    }
}

impl TryFrom<f64> for SleepAmount {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SleepAmount> for f64 {
    fn from(value: SleepAmount) -> Self {
        value.0
    }
}

/// Daily caffeine intake in cups, within `[1, 20]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CoffeeAmount(u8);

impl CoffeeAmount {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;

    pub fn new(cups: u32) -> Result<Self> {
        u8::try_from(cups)
            .ok()
            .filter(|c| (Self::MIN..=Self::MAX).contains(c))
            .map(Self)
            .ok_or(Error::CoffeeAmountOutOfRange(cups))
    }

    pub fn cups(self) -> u8 {
        self.0
    }

    pub fn step_up(self) -> Self {
        Self(self.0.saturating_add(1).min(Self::MAX))
    }

    pub fn step_down(self) -> Self {
        Self(self.0.saturating_sub(1).max(Self::MIN))
    }
}

impl Default for CoffeeAmount {
    fn default() -> Self {
        Self(1)
    }
}

impl TryFrom<u32> for CoffeeAmount {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<CoffeeAmount> for u32 {
    fn from(value: CoffeeAmount) -> Self {
        u32::from(value.0)
    }
}

/// The three validated inputs of one calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SleepInputs {
    pub wake: WakeTime,
    pub sleep: SleepAmount,
    pub coffee: CoffeeAmount,
}

impl SleepInputs {
    pub fn new(wake: WakeTime, sleep: SleepAmount, coffee: CoffeeAmount) -> Self {
        Self {
            wake,
            sleep,
            coffee,
        }
    }

    /// Validate raw values in one go.
    pub fn from_raw(hour: u8, minute: u8, sleep_hours: f64, coffee_cups: u32) -> Result<Self> {
        Ok(Self {
            wake: WakeTime::new(hour, minute)?,
            sleep: SleepAmount::new(sleep_hours)?,
            coffee: CoffeeAmount::new(coffee_cups)?,
        })
    }

    pub fn features(&self) -> Features {
        normalize(self)
    }
}

/// Normalized model input: `(wake, estimatedSleep, coffee)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    pub wake_seconds: f64,
    pub sleep_amount: f64,
    pub coffee_amount: f64,
}

/// Turn validated inputs into the scalar tuple the model consumes.
pub fn normalize(inputs: &SleepInputs) -> Features {
    Features {
        wake_seconds: inputs.wake.seconds_since_midnight(),
        sleep_amount: inputs.sleep.hours(),
        coffee_amount: f64::from(inputs.coffee.cups()),
    }
}
