use futures::future::LocalBoxFuture;
use serde::{Deserialize, Serialize};

use crate::core::{ForecastRecord, Granularity};
use crate::error::CardResult;

pub const SUBSCRIBE_FORECAST_TYPE: &str = "weather/subscribe_forecast";

/// Message sent to the host to open a forecast push stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscribeForecastMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub forecast_type: Granularity,
    pub entity_id: String,
}

impl SubscribeForecastMessage {
    #[must_use]
    pub fn new(entity_id: &str, forecast_type: Granularity) -> Self {
        Self {
            kind: SUBSCRIBE_FORECAST_TYPE.to_owned(),
            forecast_type,
            entity_id: entity_id.to_owned(),
        }
    }
}

/// One push from the forecast stream: a full replacement array.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastEvent {
    #[serde(default)]
    pub forecast: Vec<ForecastRecord>,
}

pub type ForecastCallback = Box<dyn FnMut(ForecastEvent)>;

/// Closure that closes a forecast stream.
pub type Unsubscribe = Box<dyn FnOnce()>;

/// Host acknowledgment of a subscription, resolving to its unsubscribe closure.
pub type PendingUnsubscribe = LocalBoxFuture<'static, CardResult<Unsubscribe>>;

/// Push-subscription primitive of the host state provider.
pub trait ForecastSource {
    fn subscribe_forecast(
        &mut self,
        message: SubscribeForecastMessage,
        callback: ForecastCallback,
    ) -> PendingUnsubscribe;
}
