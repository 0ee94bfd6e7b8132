use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Bucket size of a forecast feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hourly,
    #[default]
    Daily,
}

impl Granularity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
        }
    }

    #[must_use]
    pub const fn is_hourly(self) -> bool {
        matches!(self, Self::Hourly)
    }
}

/// Wind bearing as reported by the host: either degrees or a cardinal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindBearing {
    Degrees(f64),
    Cardinal(String),
}

/// One time-indexed prediction from the forecast feed.
///
/// Records arrive only as part of a full replacement array and are never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub datetime: DateTime<FixedOffset>,
    pub temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub templow: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation_probability: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_bearing: Option<WindBearing>,
    #[serde(default)]
    pub condition: String,
}

impl ForecastRecord {
    #[must_use]
    pub fn new(datetime: DateTime<FixedOffset>, temperature: f64) -> Self {
        Self {
            datetime,
            temperature,
            templow: None,
            precipitation: None,
            precipitation_probability: None,
            wind_speed: None,
            wind_bearing: None,
            condition: String::new(),
        }
    }

    #[must_use]
    pub fn with_templow(mut self, templow: f64) -> Self {
        self.templow = Some(templow);
        self
    }

    #[must_use]
    pub fn with_precipitation(mut self, amount: f64) -> Self {
        self.precipitation = Some(amount);
        self
    }

    #[must_use]
    pub fn with_precipitation_probability(mut self, probability: f64) -> Self {
        self.precipitation_probability = Some(probability);
        self
    }

    #[must_use]
    pub fn with_wind(mut self, speed: f64, bearing: WindBearing) -> Self {
        self.wind_speed = Some(speed);
        self.wind_bearing = Some(bearing);
        self
    }

    #[must_use]
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }
}

/// Returns `true` when records are ordered by non-decreasing `datetime`.
#[must_use]
pub fn is_chronological(records: &[ForecastRecord]) -> bool {
    records
        .windows(2)
        .all(|pair| pair[0].datetime <= pair[1].datetime)
}
