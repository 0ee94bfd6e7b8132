use chrono::{DateTime, Duration, DurationRound, FixedOffset};

use crate::core::{ForecastRecord, Granularity};

/// Oldest instant still shown while autoscroll is active.
///
/// One bucket behind `now`: a day for daily feeds, an hour for hourly feeds.
#[must_use]
pub fn autoscroll_cutoff(now: DateTime<FixedOffset>, granularity: Granularity) -> DateTime<FixedOffset> {
    let bucket = match granularity {
        Granularity::Hourly => Duration::hours(1),
        Granularity::Daily => Duration::hours(24),
    };
    now - bucket
}

/// Number of leading records at or before `cutoff`.
///
/// Records are chronological, so the scan stops at the first newer record.
#[must_use]
pub fn stale_prefix_len(records: &[ForecastRecord], cutoff: DateTime<FixedOffset>) -> usize {
    records
        .iter()
        .take_while(|record| record.datetime <= cutoff)
        .count()
}

/// Next wall-clock hour boundary strictly after `now`.
#[must_use]
pub fn next_hour_boundary(now: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let hour = Duration::hours(1);
    match now.duration_trunc(hour) {
        Ok(start_of_hour) => start_of_hour + hour,
        Err(_) => now + hour,
    }
}
