use chrono::{DateTime, FixedOffset};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::ForecastRecord;

/// Which precipitation value feeds the bar series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PrecipitationMode {
    #[default]
    Rainfall,
    Probability,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeriesOptions {
    pub precipitation_mode: PrecipitationMode,
    pub round_temperatures: bool,
}

/// Parallel chart series derived from a window of forecast records.
///
/// `temp_high`, `date_time`, `precip` and `precip_probability` are aligned
/// with the source slice. `temp_low` only carries entries for records that
/// have a low, so it can be shorter than `temp_high`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastSeries {
    pub date_time: Vec<DateTime<FixedOffset>>,
    pub temp_high: Vec<f64>,
    pub temp_low: Vec<f64>,
    pub precip: Vec<Option<f64>>,
    pub precip_probability: Vec<Option<f64>>,
}

impl ForecastSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.date_time.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date_time.is_empty()
    }

    /// Observed temperature range over both temperature series.
    #[must_use]
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        let values = || {
            self.temp_high
                .iter()
                .chain(&self.temp_low)
                .copied()
                .map(OrderedFloat)
        };
        let min = values().min()?;
        let max = values().max()?;
        Some((min.into_inner(), max.into_inner()))
    }
}

/// Rounds half-way values toward positive infinity.
#[must_use]
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Builds chart series from the first `item_count` records.
#[must_use]
pub fn build_forecast_series(
    records: &[ForecastRecord],
    item_count: usize,
    options: SeriesOptions,
) -> ForecastSeries {
    let window = &records[..item_count.min(records.len())];
    let round = |value: f64| {
        if options.round_temperatures {
            round_half_up(value)
        } else {
            value
        }
    };

    let mut series = ForecastSeries {
        date_time: Vec::with_capacity(window.len()),
        temp_high: Vec::with_capacity(window.len()),
        temp_low: Vec::with_capacity(window.len()),
        precip: Vec::with_capacity(window.len()),
        precip_probability: Vec::with_capacity(window.len()),
    };

    for record in window {
        series.date_time.push(record.datetime);
        series.temp_high.push(round(record.temperature));
        if let Some(low) = record.templow {
            series.temp_low.push(round(low));
        }
        series.precip.push(match options.precipitation_mode {
            PrecipitationMode::Rainfall => record.precipitation,
            PrecipitationMode::Probability => record.precipitation_probability,
        });
        series.precip_probability.push(record.precipitation_probability);
    }

    series
}
