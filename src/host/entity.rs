use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Capability bits a weather entity declares in `supported_features`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeatherFeatures(pub u32);

impl WeatherFeatures {
    pub const FORECAST_DAILY: Self = Self(1);
    pub const FORECAST_HOURLY: Self = Self(2);
    pub const FORECAST_TWICE_DAILY: Self = Self(4);

    #[must_use]
    pub const fn supports(self, feature: Self) -> bool {
        self.0 & feature.0 != 0
    }
}

/// One entity as published by the host state provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub state: String,
    #[serde(default)]
    pub attributes: Map<String, Value>,
    pub last_changed: DateTime<FixedOffset>,
}

impl EntitySnapshot {
    #[must_use]
    pub fn new(state: impl Into<String>, last_changed: DateTime<FixedOffset>) -> Self {
        Self {
            state: state.into(),
            attributes: Map::new(),
            last_changed,
        }
    }

    #[must_use]
    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_owned(), value.into());
        self
    }

    /// Numeric attribute; numeric strings are accepted.
    #[must_use]
    pub fn attribute_f64(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).and_then(value_as_f64)
    }

    #[must_use]
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key).filter(|value| !value.is_null())
    }

    /// Entity state parsed as a number.
    #[must_use]
    pub fn state_f64(&self) -> Option<f64> {
        self.state.trim().parse().ok()
    }

    #[must_use]
    pub fn supported_features(&self) -> WeatherFeatures {
        WeatherFeatures(
            self.attributes
                .get("supported_features")
                .and_then(Value::as_u64)
                .and_then(|bits| u32::try_from(bits).ok())
                .unwrap_or(0),
        )
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Snapshot of every entity the host exposes, plus the user's language.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HostState {
    #[serde(default)]
    pub states: IndexMap<String, EntitySnapshot>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub selected_language: Option<String>,
}

impl HostState {
    #[must_use]
    pub fn entity(&self, entity_id: &str) -> Option<&EntitySnapshot> {
        self.states.get(entity_id)
    }

    #[must_use]
    pub fn with_entity(mut self, entity_id: &str, snapshot: EntitySnapshot) -> Self {
        self.states.insert(entity_id.to_owned(), snapshot);
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = Some(language.to_owned());
        self
    }
}
