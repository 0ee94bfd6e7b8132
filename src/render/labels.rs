//! Text produced for chart ticks, bar labels and tooltips.
//!
//! Backends call these formatters lazily, so a series patch keeps using the
//! formatting policy chosen at the last rebuild.

use chrono::{DateTime, FixedOffset};
use smallvec::SmallVec;

use crate::core::{CardLocale, Granularity, PrecipitationMode, round_half_up};
use crate::render::SeriesField;

/// One tick label; a second line carries the date at midnight.
pub type TickLabel = SmallVec<[String; 2]>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickFormat {
    pub granularity: Granularity,
    pub locale: CardLocale,
    pub show_hourly_date: bool,
    pub timezone: FixedOffset,
}

impl TickFormat {
    #[must_use]
    pub fn format(&self, datetime: DateTime<FixedOffset>) -> TickLabel {
        let local = datetime.with_timezone(&self.timezone);
        let mut lines = TickLabel::new();

        match self.granularity {
            Granularity::Daily => lines.push(self.locale.weekday_short(local)),
            Granularity::Hourly => {
                if self.show_hourly_date && crate::core::is_midnight(local) {
                    lines.push(self.locale.short_date(local));
                }
                lines.push(self.locale.hour_label(local));
            }
        }
        lines
    }
}

/// Formats a precipitation amount the way bar labels show it.
fn format_amount(value: f64) -> String {
    if value > 9.0 {
        format!("{}", round_half_up(value))
    } else {
        format!("{value:.2}")
    }
}

/// Value labels drawn on precipitation bars.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecipLabelFormat {
    pub mode: PrecipitationMode,
    pub unit: String,
    pub show_unit: bool,
    pub show_probability: bool,
}

impl PrecipLabelFormat {
    /// Label for one bar; `None` hides the label for non-positive or missing values.
    #[must_use]
    pub fn format(&self, value: Option<f64>, probability: Option<f64>) -> Option<String> {
        let value = value.filter(|value| *value > 0.0)?;
        let amount = format_amount(value);

        let text = match self.mode {
            PrecipitationMode::Probability => format!("{amount}%"),
            PrecipitationMode::Rainfall => {
                let unit = if self.show_unit {
                    format!(" {}", self.unit)
                } else {
                    String::new()
                };
                match probability.filter(|_| self.show_probability) {
                    Some(probability) => {
                        format!("{amount}{unit}\n\n{}%", round_half_up(probability))
                    }
                    None => format!("{amount}{unit}"),
                }
            }
        };
        Some(text)
    }
}

/// Tooltip text for a hovered column.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipFormat {
    pub locale: CardLocale,
    pub timezone: FixedOffset,
    pub temperature_unit: String,
    pub precip_unit: String,
    pub mode: PrecipitationMode,
    pub show_probability: bool,
}

impl TooltipFormat {
    #[must_use]
    pub fn title(&self, datetime: DateTime<FixedOffset>) -> String {
        self.locale
            .tooltip_title(datetime.with_timezone(&self.timezone))
    }

    #[must_use]
    pub fn label(
        &self,
        field: SeriesField,
        dataset_label: &str,
        value: f64,
        probability: Option<f64>,
    ) -> String {
        match field {
            SeriesField::Precipitation => match self.mode {
                PrecipitationMode::Probability => format!("{dataset_label}: {value}%"),
                PrecipitationMode::Rainfall => match probability.filter(|_| self.show_probability) {
                    Some(probability) => format!(
                        "{dataset_label}: {value} {} / {}%",
                        self.precip_unit,
                        round_half_up(probability)
                    ),
                    None => format!("{dataset_label}: {value} {}", self.precip_unit),
                },
            },
            SeriesField::TempHigh | SeriesField::TempLow => {
                format!("{dataset_label}: {value} {}", self.temperature_unit)
            }
        }
    }
}
