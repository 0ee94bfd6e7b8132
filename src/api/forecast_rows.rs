use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::core::{
    ForecastRecord, LayoutMetrics, bearing_icon, condition_image_day, condition_image_night,
    condition_material_icon, convert_speed, round_half_up, unit_label,
};

use super::CardConfig;
use super::conditions::SunTimes;

/// Condition icon: a material icon name or an image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum WeatherIcon {
    Material(&'static str),
    Image(String),
}

/// Picks the icon for `condition` under the configured icon set.
#[must_use]
pub fn resolve_condition_icon(config: &CardConfig, condition: &str, daytime: bool) -> WeatherIcon {
    let stem = if daytime {
        condition_image_day(condition)
    } else {
        condition_image_night(condition)
    };

    if config.animated_icons {
        WeatherIcon::Image(format!("{}{stem}.svg", config.icon_style.base_path()))
    } else if let Some(base) = config.icons.as_deref() {
        WeatherIcon::Image(format!("{base}{stem}.svg"))
    } else {
        WeatherIcon::Material(condition_material_icon(condition))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindCell {
    pub icon: Option<&'static str>,
    /// Rounded speed in the display unit.
    pub speed: Option<f64>,
    /// Present when the unit label is shown.
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastColumn {
    pub datetime: DateTime<FixedOffset>,
    pub icon: Option<WeatherIcon>,
    pub wind: Option<WindCell>,
}

/// The condition and wind rows under the chart.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ForecastRows {
    pub columns: Vec<ForecastColumn>,
    pub min_width: f64,
}

/// Units the wind row converts between.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindUnits<'a> {
    /// Unit the forecast feed reports.
    pub source: Option<&'a str>,
    pub display: Option<&'a str>,
}

/// Builds one column per visible record.
#[must_use]
pub fn forecast_rows(
    records: &[ForecastRecord],
    metrics: LayoutMetrics,
    config: &CardConfig,
    sun: Option<&SunTimes>,
    wind_units: WindUnits<'_>,
) -> ForecastRows {
    let forecast = &config.forecast;
    let shown = &records[..metrics.visible_item_count.min(records.len())];

    let columns = shown
        .iter()
        .map(|record| {
            let icon = forecast.condition_icons.then(|| {
                let daytime = !forecast.forecast_type.is_hourly()
                    || sun.is_none_or(|sun| sun.is_daytime_at(record.datetime));
                resolve_condition_icon(config, &record.condition, daytime)
            });
            let wind = forecast
                .show_wind_forecast
                .then(|| wind_cell(record, config, wind_units));
            ForecastColumn {
                datetime: record.datetime,
                icon,
                wind,
            }
        })
        .collect();

    ForecastRows {
        columns,
        min_width: metrics.row_min_width(shown.len()),
    }
}

fn wind_cell(record: &ForecastRecord, config: &CardConfig, units: WindUnits<'_>) -> WindCell {
    let speed = record.wind_speed.map(|speed| match (units.source, units.display) {
        (Some(from), Some(to)) => round_half_up(convert_speed(speed, from, to)),
        _ => round_half_up(speed),
    });
    let unit = units
        .display
        .or(units.source)
        .filter(|_| config.forecast.show_wind_unit)
        .map(|unit| unit_label(unit).to_owned());

    WindCell {
        icon: record.wind_bearing.as_ref().map(bearing_icon),
        speed,
        unit,
    }
}

#[cfg(test)]
mod tests {
    use super::{WeatherIcon, resolve_condition_icon};
    use crate::api::{CardConfig, IconStyle};

    #[test]
    fn icon_set_follows_config() {
        let mut config = CardConfig::for_entity("weather.home");
        assert_eq!(
            resolve_condition_icon(&config, "rainy", true),
            WeatherIcon::Material("hass:weather-rainy")
        );

        config.icons = Some("/local/icons/".to_owned());
        assert_eq!(
            resolve_condition_icon(&config, "rainy", false),
            WeatherIcon::Image("/local/icons/rainy-2-night.svg".to_owned())
        );

        config.animated_icons = true;
        config.icon_style = IconStyle::Style2;
        assert_eq!(
            resolve_condition_icon(&config, "sunny", true),
            WeatherIcon::Image(format!("{}clear-day.svg", IconStyle::Style2.base_path()))
        );
    }
}
