//! Current weather readings shown above the forecast chart.
//!
//! Each reading comes from its override entity when one is configured and
//! from the weather entity's attributes otherwise.

use chrono::{DateTime, FixedOffset};

use crate::core::{
    CardLocale, PressureUnit, Translations, WindBearing, bearing_icon, cardinal_index,
    convert_pressure, convert_speed, round_half_up, unit_label,
};
use crate::host::{EntitySnapshot, HostState};

use super::forecast_rows::{WeatherIcon, resolve_condition_icon};
use super::CardConfig;

pub const SUN_ENTITY_ID: &str = "sun.sun";

/// A numeric reading and the unit it was reported in.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub value: f64,
    pub unit: Option<String>,
}

/// Next sunrise and sunset as published by the sun entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    pub next_rising: DateTime<FixedOffset>,
    pub next_setting: DateTime<FixedOffset>,
    pub below_horizon: bool,
}

impl SunTimes {
    #[must_use]
    pub fn from_entity(sun: &EntitySnapshot) -> Option<Self> {
        let parse = |key: &str| {
            sun.attribute_str(key)
                .and_then(|text| DateTime::parse_from_rfc3339(text).ok())
        };
        Some(Self {
            next_rising: parse("next_rising")?,
            next_setting: parse("next_setting")?,
            below_horizon: sun.state == "below_horizon",
        })
    }

    /// Whether `at` falls between sunrise and sunset by time of day.
    #[must_use]
    pub fn is_daytime_at(&self, at: DateTime<FixedOffset>) -> bool {
        let local = |instant: DateTime<FixedOffset>| instant.with_timezone(at.offset()).time();
        let time = at.time();
        local(self.next_rising) <= time && time <= local(self.next_setting)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub condition: String,
    pub temperature: Option<Reading>,
    pub feels_like: Option<Reading>,
    pub dew_point: Option<Reading>,
    pub pressure: Option<Reading>,
    pub wind_speed: Option<Reading>,
    pub wind_gust_speed: Option<Reading>,
    pub visibility: Option<Reading>,
    pub humidity: Option<f64>,
    pub uv_index: Option<f64>,
    pub wind_bearing: Option<WindBearing>,
    pub description: Option<String>,
    pub sun: Option<SunTimes>,
    /// Unit wind speeds are shown in.
    pub speed_unit: Option<String>,
    /// Unit pressure is shown in.
    pub pressure_unit: Option<String>,
}

fn entity_state_f64(host: &HostState, entity_id: Option<&str>) -> Option<Option<f64>> {
    entity_id.map(|entity_id| host.entity(entity_id).and_then(EntitySnapshot::state_f64))
}

fn reading(
    host: &HostState,
    weather: &EntitySnapshot,
    override_entity: Option<&str>,
    override_unit: Option<&str>,
    attribute: &str,
    unit_attribute: &str,
) -> Option<Reading> {
    let weather_unit = weather.attribute_str(unit_attribute).map(str::to_owned);
    match entity_state_f64(host, override_entity) {
        Some(value) => value.map(|value| Reading {
            value,
            unit: override_unit.map(str::to_owned).or(weather_unit),
        }),
        None => weather.attribute_f64(attribute).map(|value| Reading {
            value,
            unit: weather_unit,
        }),
    }
}

impl CurrentConditions {
    /// Resolves every reading; `None` when the weather entity is missing.
    #[must_use]
    pub fn derive(config: &CardConfig, host: &HostState) -> Option<Self> {
        let weather = host.entity(config.entity_id())?;
        let overrides = &config.overrides;

        let visibility_entity = overrides.visibility_entity.as_deref().or_else(|| {
            overrides
                .visibility
                .as_deref()
                .filter(|entity_id| host.entity(entity_id).is_some())
        });

        let wind_bearing = overrides
            .winddir
            .as_deref()
            .and_then(|entity_id| host.entity(entity_id))
            .and_then(|entity| entity.state_f64())
            .map(WindBearing::Degrees)
            .or_else(|| {
                weather
                    .attribute("wind_bearing")
                    .and_then(|value| serde_json::from_value(value.clone()).ok())
            });

        let description = match overrides.description.as_deref().and_then(|id| host.entity(id)) {
            Some(entity) => Some(entity.state.clone()),
            None => weather.attribute_str("description").map(str::to_owned),
        };

        Some(Self {
            condition: weather.state.clone(),
            temperature: reading(
                host,
                weather,
                overrides.temp.as_deref(),
                overrides.temp_unit.as_deref(),
                "temperature",
                "temperature_unit",
            ),
            feels_like: reading(
                host,
                weather,
                overrides.feels_like.as_deref(),
                overrides.feels_like_unit.as_deref(),
                "apparent_temperature",
                "temperature_unit",
            ),
            dew_point: reading(
                host,
                weather,
                overrides.dew_point.as_deref(),
                overrides.dew_point_unit.as_deref(),
                "dew_point",
                "temperature_unit",
            ),
            pressure: reading(
                host,
                weather,
                overrides.press.as_deref(),
                overrides.press_unit.as_deref(),
                "pressure",
                "pressure_unit",
            ),
            wind_speed: reading(
                host,
                weather,
                overrides.windspeed.as_deref(),
                overrides.windspeed_unit.as_deref(),
                "wind_speed",
                "wind_speed_unit",
            ),
            wind_gust_speed: reading(
                host,
                weather,
                overrides.wind_gust_speed.as_deref(),
                overrides.wind_gust_speed_unit.as_deref(),
                "wind_gust_speed",
                "wind_speed_unit",
            ),
            visibility: reading(
                host,
                weather,
                visibility_entity,
                overrides.visibility_unit.as_deref(),
                "visibility",
                "visibility_unit",
            ),
            humidity: entity_state_f64(host, overrides.humid.as_deref())
                .unwrap_or_else(|| weather.attribute_f64("humidity")),
            uv_index: entity_state_f64(host, overrides.uv.as_deref())
                .unwrap_or_else(|| weather.attribute_f64("uv_index")),
            wind_bearing,
            description,
            sun: host.entity(SUN_ENTITY_ID).and_then(SunTimes::from_entity),
            speed_unit: config
                .units
                .speed
                .clone()
                .or_else(|| weather.attribute_str("wind_speed_unit").map(str::to_owned)),
            pressure_unit: Some(config.units.pressure.clone())
                .filter(|unit| !unit.is_empty())
                .or_else(|| weather.attribute_str("pressure_unit").map(str::to_owned)),
        })
    }

    /// Icon for the current condition; night images follow the sun entity.
    #[must_use]
    pub fn condition_icon(&self, config: &CardConfig) -> WeatherIcon {
        let daytime = self.sun.is_none_or(|sun| !sun.below_horizon);
        resolve_condition_icon(config, &self.condition, daytime)
    }

    #[must_use]
    pub fn condition_text(&self, translations: &Translations) -> String {
        translations
            .condition(&self.condition)
            .map_or_else(|| self.condition.clone(), str::to_owned)
    }

    #[must_use]
    pub fn temperature_text(&self) -> Option<String> {
        self.temperature.as_ref().map(|reading| format_temperature(reading.value))
    }

    #[must_use]
    pub fn feels_like_text(&self) -> Option<String> {
        self.feels_like.as_ref().map(|reading| format_temperature(reading.value))
    }

    /// Pressure in the display unit with that unit's precision, plus its label.
    #[must_use]
    pub fn pressure_text(&self) -> Option<String> {
        let reading = self.pressure.as_ref()?;
        let display_unit = self.pressure_unit.as_deref().or(reading.unit.as_deref())?;
        let from = reading.unit.as_deref().unwrap_or(display_unit);
        let value = convert_pressure(reading.value, from, display_unit);

        let number = match PressureUnit::from_key(display_unit).and_then(PressureUnit::display_precision) {
            Some(precision) => format!("{value:.precision$}"),
            None => format!("{}", round_half_up(value)),
        };
        Some(format!("{number} {}", unit_label(display_unit)))
    }

    #[must_use]
    pub fn wind_speed_text(&self) -> Option<String> {
        self.speed_text(self.wind_speed.as_ref()?)
    }

    #[must_use]
    pub fn wind_gust_speed_text(&self) -> Option<String> {
        self.speed_text(self.wind_gust_speed.as_ref()?)
    }

    fn speed_text(&self, reading: &Reading) -> Option<String> {
        let display_unit = self.speed_unit.as_deref().or(reading.unit.as_deref())?;
        let from = reading.unit.as_deref().unwrap_or(display_unit);
        let value = round_half_up(convert_speed(reading.value, from, display_unit));
        Some(format!("{value} {}", unit_label(display_unit)))
    }

    #[must_use]
    pub fn wind_direction_icon(&self) -> Option<&'static str> {
        self.wind_bearing.as_ref().map(bearing_icon)
    }

    /// Cardinal name of the wind bearing in the card language.
    #[must_use]
    pub fn wind_direction_text(&self, translations: &Translations) -> Option<String> {
        match self.wind_bearing.as_ref()? {
            WindBearing::Degrees(degrees) => cardinal_index(*degrees)
                .map(|index| translations.cardinal_directions[index].to_owned()),
            WindBearing::Cardinal(cardinal) => Some(cardinal.clone()),
        }
    }

    #[must_use]
    pub fn uv_text(&self) -> Option<String> {
        self.uv_index
            .map(|uv| format!("{}", round_half_up(uv * 10.0) / 10.0))
    }

    /// Sunrise and sunset clock times.
    #[must_use]
    pub fn sun_text(&self, locale: CardLocale) -> Option<(String, String)> {
        self.sun.map(|sun| {
            (
                locale.clock_time(sun.next_rising, false),
                locale.clock_time(sun.next_setting, false),
            )
        })
    }
}

/// Whole numbers as-is, fractional values to one decimal.
#[must_use]
pub fn format_temperature(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value}")
    } else {
        format!("{}", round_half_up(value * 10.0) / 10.0)
    }
}
