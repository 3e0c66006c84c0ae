//! Successful estimate, before it is turned into a display string.

use std::fmt;

use time::Time;

use crate::core::format::{format_short_time, ClockConvention};
use crate::core::inputs::{WakeTime, SECONDS_PER_HOUR};
use crate::error::Result;
use crate::i18n;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bedtime {
    /// Clock time to fall asleep at. No date: see [`Bedtime::crosses_midnight`].
    pub time: Time,
    /// Model output, in hours.
    pub required_sleep_hours: f64,
    pub wake: WakeTime,
}

impl Bedtime {
    pub fn format(&self, convention: ClockConvention) -> Result<String> {
        format_short_time(self.time, convention)
    }

    /// Short time in the requested locale's clock convention.
    pub fn format_localized(&self) -> Result<String> {
        self.format(i18n::clock_convention())
    }

    /// True when bedtime falls on a calendar day before the wake day.
    ///
    /// Decided from the sleep need rather than the clock times, which match
    /// once the prediction is a whole number of days.
    pub fn crosses_midnight(&self) -> bool {
        self.required_sleep_hours * SECONDS_PER_HOUR > self.wake.seconds_since_midnight()
    }
}

impl fmt::Display for Bedtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.time.hour(), self.time.minute())
    }
}
