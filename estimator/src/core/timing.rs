//! Clock arithmetic for counting backwards from a wake time.

use time::{Duration, Time};

use super::inputs::SECONDS_PER_HOUR;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The time-of-day `hours` before `time`, wrapping past midnight.
///
/// `hours` must be finite; whole days fold away since only the clock
/// reading matters.
pub fn hours_before(time: Time, hours: f64) -> Time {
    let seconds = (hours * SECONDS_PER_HOUR).rem_euclid(SECONDS_PER_DAY);
    time - Duration::seconds_f64(seconds)
}
