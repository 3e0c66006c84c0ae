//! Formatting helpers for presenting bedtimes and input labels.

use time::{macros::format_description, Time};
use unic_langid::LanguageIdentifier;

use crate::error::Result;

/// Regions whose short time format is conventionally 12-hour.
const TWELVE_HOUR_REGIONS: &[&str] = &[
    "US", "CA", "AU", "NZ", "PH", "IN", "PK", "BD", "EG", "SA", "JO", "MY", "CO", "MX", "SV",
    "HN", "NI",
];

/// Hour cycle used for short time-of-day strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClockConvention {
    /// `9:00 PM`
    #[default]
    TwelveHour,
    /// `21:00`
    TwentyFourHour,
}

impl ClockConvention {
    pub fn for_language(lang: &LanguageIdentifier) -> Self {
        match lang.region.as_ref() {
            Some(region) if TWELVE_HOUR_REGIONS.contains(&region.as_str()) => Self::TwelveHour,
            Some(_) => Self::TwentyFourHour,
            None if lang.language.as_str() == "en" => Self::TwelveHour,
            None => Self::TwentyFourHour,
        }
    }
}

/// Short time-of-day, seconds omitted.
pub fn format_short_time(time: Time, convention: ClockConvention) -> Result<String> {
    let formatted = match convention {
        ClockConvention::TwelveHour => {
            time.format(&format_description!("[hour repr:12 padding:none]:[minute] [period]"))?
        }
        ClockConvention::TwentyFourHour => time.format(&format_description!("[hour]:[minute]"))?,
    };
    Ok(formatted)
}

/// Hours with trailing zeros dropped: `8`, `8.25`, `8.5`.
pub fn format_hours(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}
