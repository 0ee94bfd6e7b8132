use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::SubscriptionKey;
use crate::core::{ColumnWidthPolicy, Granularity, PrecipitationMode, SeriesOptions};
use crate::error::{CardError, CardResult};

/// Image set used when `animated_icons` is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IconStyle {
    #[default]
    Style1,
    Style2,
}

impl IconStyle {
    #[must_use]
    pub const fn base_path(self) -> &'static str {
        match self {
            Self::Style1 => "https://cdn.jsdelivr.net/gh/mlamberts78/weather-chart-card/dist/icons/",
            Self::Style2 => {
                "https://cdn.jsdelivr.net/gh/mlamberts78/weather-chart-card/dist/icons2/"
            }
        }
    }
}

/// Chart label presentation: axis-style ticks or pill labels on the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    #[default]
    Style1,
    Style2,
}

fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(number) => Ok(number),
        Raw::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("expected a number, got `{text}`"))),
    }
}

fn count_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = number_or_string(deserializer)?;
    if value.is_finite() && value >= 0.0 {
        Ok(value.trunc() as usize)
    } else {
        Err(de::Error::custom(format!("expected a non-negative count, got {value}")))
    }
}

const fn default_true() -> bool {
    true
}

const fn default_icons_size() -> f64 {
    25.0
}

const fn default_current_temp_size() -> f64 {
    28.0
}

const fn default_time_size() -> f64 {
    26.0
}

const fn default_day_date_size() -> f64 {
    15.0
}

const fn default_labels_font_size() -> f64 {
    11.0
}

const fn default_chart_height() -> f64 {
    180.0
}

const fn default_precip_bar_size() -> f64 {
    100.0
}

fn default_temperature1_color() -> String {
    "rgba(255, 152, 0, 1.0)".to_owned()
}

fn default_temperature2_color() -> String {
    "rgba(68, 115, 158, 1.0)".to_owned()
}

fn default_precipitation_color() -> String {
    "rgba(132, 209, 253, 1.0)".to_owned()
}

fn default_pressure_unit() -> String {
    "hPa".to_owned()
}

/// Display units; `None` keeps the entity's own unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitsConfig {
    #[serde(default = "default_pressure_unit")]
    pub pressure: String,
    #[serde(default)]
    pub speed: Option<String>,
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            pressure: default_pressure_unit(),
            speed: None,
        }
    }
}

/// Alternate entities feeding individual readings, with optional unit overrides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeOverrides {
    #[serde(default)]
    pub temp: Option<String>,
    #[serde(default)]
    pub temp_unit: Option<String>,
    #[serde(default)]
    pub feels_like: Option<String>,
    #[serde(default)]
    pub feels_like_unit: Option<String>,
    #[serde(default)]
    pub dew_point: Option<String>,
    #[serde(default)]
    pub dew_point_unit: Option<String>,
    #[serde(default)]
    pub press: Option<String>,
    #[serde(default)]
    pub press_unit: Option<String>,
    #[serde(default)]
    pub windspeed: Option<String>,
    #[serde(default)]
    pub windspeed_unit: Option<String>,
    #[serde(default)]
    pub wind_gust_speed: Option<String>,
    #[serde(default)]
    pub wind_gust_speed_unit: Option<String>,
    #[serde(default)]
    pub visibility_entity: Option<String>,
    /// Older configs put the visibility entity here.
    #[serde(default)]
    pub visibility: Option<String>,
    #[serde(default)]
    pub visibility_unit: Option<String>,
    #[serde(default)]
    pub humid: Option<String>,
    #[serde(default)]
    pub uv: Option<String>,
    #[serde(default)]
    pub winddir: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// The `forecast:` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    #[serde(default)]
    pub precipitation_type: PrecipitationMode,
    #[serde(default)]
    pub show_probability: bool,
    #[serde(default = "default_labels_font_size", deserialize_with = "number_or_string")]
    pub labels_font_size: f64,
    #[serde(default = "default_chart_height", deserialize_with = "number_or_string")]
    pub chart_height: f64,
    #[serde(default = "default_precip_bar_size", deserialize_with = "number_or_string")]
    pub precip_bar_size: f64,
    #[serde(default)]
    pub style: ChartStyle,
    #[serde(default = "default_temperature1_color")]
    pub temperature1_color: String,
    #[serde(default = "default_temperature2_color")]
    pub temperature2_color: String,
    #[serde(default = "default_precipitation_color")]
    pub precipitation_color: String,
    /// `auto` follows the theme text color.
    #[serde(default)]
    pub chart_text_color: Option<String>,
    #[serde(default)]
    pub chart_datetime_color: Option<String>,
    #[serde(default = "default_true")]
    pub condition_icons: bool,
    #[serde(default = "default_true")]
    pub show_wind_forecast: bool,
    #[serde(default)]
    pub round_temp: bool,
    #[serde(default, rename = "type")]
    pub forecast_type: Granularity,
    /// `0` fits as many columns as the card width allows.
    #[serde(default, deserialize_with = "count_or_string")]
    pub number_of_forecasts: usize,
    #[serde(default)]
    pub disable_animation: bool,
    #[serde(default = "default_true")]
    pub show_hourly_date: bool,
    #[serde(default = "default_true")]
    pub show_precip_unit: bool,
    #[serde(default = "default_true")]
    pub show_wind_unit: bool,
    #[serde(default, deserialize_with = "number_or_string")]
    pub override_min_column_width: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            precipitation_type: PrecipitationMode::Rainfall,
            show_probability: false,
            labels_font_size: default_labels_font_size(),
            chart_height: default_chart_height(),
            precip_bar_size: default_precip_bar_size(),
            style: ChartStyle::Style1,
            temperature1_color: default_temperature1_color(),
            temperature2_color: default_temperature2_color(),
            precipitation_color: default_precipitation_color(),
            chart_text_color: None,
            chart_datetime_color: None,
            condition_icons: true,
            show_wind_forecast: true,
            round_temp: false,
            forecast_type: Granularity::Daily,
            number_of_forecasts: 0,
            disable_animation: false,
            show_hourly_date: true,
            show_precip_unit: true,
            show_wind_unit: true,
            override_min_column_width: 0.0,
        }
    }
}

/// Card configuration as written by the user.
///
/// Every field has the card's default, so a config only needs `entity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default = "default_true")]
    pub show_main: bool,
    #[serde(default = "default_true")]
    pub show_temperature: bool,
    #[serde(default = "default_true")]
    pub show_current_condition: bool,
    #[serde(default = "default_true")]
    pub show_attributes: bool,
    #[serde(default)]
    pub show_time: bool,
    #[serde(default)]
    pub show_time_seconds: bool,
    #[serde(default)]
    pub show_day: bool,
    #[serde(default)]
    pub show_date: bool,
    #[serde(default = "default_true")]
    pub show_humidity: bool,
    #[serde(default = "default_true")]
    pub show_pressure: bool,
    #[serde(default = "default_true")]
    pub show_wind_direction: bool,
    #[serde(default = "default_true")]
    pub show_wind_speed: bool,
    #[serde(default = "default_true")]
    pub show_sun: bool,
    #[serde(default)]
    pub show_feels_like: bool,
    #[serde(default)]
    pub show_dew_point: bool,
    #[serde(default)]
    pub show_wind_gust_speed: bool,
    #[serde(default)]
    pub show_visibility: bool,
    #[serde(default)]
    pub show_last_changed: bool,
    #[serde(default)]
    pub show_description: bool,
    #[serde(default)]
    pub use_12hour_format: bool,
    #[serde(default = "default_icons_size", deserialize_with = "number_or_string")]
    pub icons_size: f64,
    #[serde(default)]
    pub animated_icons: bool,
    #[serde(default)]
    pub icon_style: IconStyle,
    /// Base path of a custom image set.
    #[serde(default)]
    pub icons: Option<String>,
    #[serde(default = "default_current_temp_size", deserialize_with = "number_or_string")]
    pub current_temp_size: f64,
    #[serde(default = "default_time_size", deserialize_with = "number_or_string")]
    pub time_size: f64,
    #[serde(default = "default_day_date_size", deserialize_with = "number_or_string")]
    pub day_date_size: f64,
    #[serde(default)]
    pub autoscroll: bool,
    #[serde(default)]
    pub units: UnitsConfig,
    /// Legacy spelling of `units.speed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<String>,
    #[serde(default)]
    pub forecast: ForecastConfig,
    #[serde(flatten)]
    pub overrides: AttributeOverrides,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            entity: None,
            title: None,
            locale: None,
            show_main: true,
            show_temperature: true,
            show_current_condition: true,
            show_attributes: true,
            show_time: false,
            show_time_seconds: false,
            show_day: false,
            show_date: false,
            show_humidity: true,
            show_pressure: true,
            show_wind_direction: true,
            show_wind_speed: true,
            show_sun: true,
            show_feels_like: false,
            show_dew_point: false,
            show_wind_gust_speed: false,
            show_visibility: false,
            show_last_changed: false,
            show_description: false,
            use_12hour_format: false,
            icons_size: default_icons_size(),
            animated_icons: false,
            icon_style: IconStyle::Style1,
            icons: None,
            current_temp_size: default_current_temp_size(),
            time_size: default_time_size(),
            day_date_size: default_day_date_size(),
            autoscroll: false,
            units: UnitsConfig::default(),
            speed: None,
            forecast: ForecastConfig::default(),
            overrides: AttributeOverrides::default(),
        }
    }
}

impl CardConfig {
    /// Minimal config bound to one entity.
    #[must_use]
    pub fn for_entity(entity_id: &str) -> Self {
        Self {
            entity: Some(entity_id.to_owned()),
            ..Self::default()
        }
    }

    pub fn from_json_str(json: &str) -> CardResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> CardResult<Self> {
        let config: Self =
            serde_json::from_value(value).map_err(|err| CardError::InvalidConfig(err.to_string()))?;
        config.normalized()
    }

    /// Validates and folds legacy keys into their current place.
    pub fn normalized(mut self) -> CardResult<Self> {
        if self.entity.as_deref().is_none_or(|entity| entity.trim().is_empty()) {
            return Err(CardError::MissingEntity);
        }
        if let Some(speed) = self.speed.take() {
            self.units.speed = Some(speed);
        }
        Ok(self)
    }

    /// Suggested config for a new card: the first unused weather entity, else any weather entity.
    #[must_use]
    pub fn stub(unused_entities: &[&str], all_entities: &[&str]) -> Self {
        let is_weather = |entity_id: &&&str| entity_id.split('.').next() == Some("weather");
        let entity = unused_entities
            .iter()
            .find(is_weather)
            .or_else(|| all_entities.iter().find(is_weather))
            .map(|entity_id| (*entity_id).to_owned());

        Self {
            entity,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn entity_id(&self) -> &str {
        self.entity.as_deref().unwrap_or_default()
    }

    #[must_use]
    pub fn granularity(&self) -> Granularity {
        self.forecast.forecast_type
    }

    #[must_use]
    pub fn subscription_key(&self) -> SubscriptionKey {
        SubscriptionKey::new(self.entity_id(), self.granularity())
    }

    #[must_use]
    pub fn series_options(&self) -> SeriesOptions {
        SeriesOptions {
            precipitation_mode: self.forecast.precipitation_type,
            round_temperatures: self.forecast.round_temp,
        }
    }

    #[must_use]
    pub fn column_width_policy(&self) -> ColumnWidthPolicy {
        ColumnWidthPolicy {
            labels_font_size: self.forecast.labels_font_size,
            show_wind_forecast: self.forecast.show_wind_forecast,
            show_wind_unit: self.forecast.show_wind_unit,
            show_precip_unit: self.forecast.show_precip_unit,
            granularity: self.granularity(),
            show_hourly_date: self.forecast.show_hourly_date,
            override_min_width: self.forecast.override_min_column_width,
        }
    }

    /// Minimum width of one forecast column in pixels.
    #[must_use]
    pub fn column_min_width(&self) -> f64 {
        self.column_width_policy().column_min_width()
    }
}
