#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Duration, FixedOffset};
use futures::FutureExt;
use futures::channel::oneshot;
use futures::executor::LocalPool;
use weather_chart::api::CardConfig;
use weather_chart::core::{ForecastRecord, WindBearing};
use weather_chart::host::{
    CardHost, EntitySnapshot, FixedClock, ForecastCallback, ForecastEvent, ForecastSource,
    HostState, ManualScheduler, PendingUnsubscribe, SubscribeForecastMessage, Unsubscribe,
    WeatherFeatures,
};
use weather_chart::render::{CanvasId, HeadlessSurface, NullChartRenderer};
use weather_chart::{CardError, WeatherCard};

pub const WEATHER: &str = "weather.home";

pub type TestCard = WeatherCard<NullChartRenderer, HeadlessSurface>;

#[derive(Default)]
struct SourceLog {
    deferred: bool,
    messages: Vec<SubscribeForecastMessage>,
    callbacks: Vec<ForecastCallback>,
    acks: Vec<Option<oneshot::Sender<()>>>,
    unsubscribed: Vec<usize>,
}

/// Forecast source that records every call. Clones share the same log.
#[derive(Clone, Default)]
pub struct RecordingSource {
    log: Rc<RefCell<SourceLog>>,
}

impl RecordingSource {
    /// Acknowledges subscriptions immediately.
    pub fn new() -> Self {
        Self::default()
    }

    /// Holds every acknowledgment until `ack` is called.
    pub fn deferred() -> Self {
        let source = Self::default();
        source.log.borrow_mut().deferred = true;
        source
    }

    pub fn subscribe_count(&self) -> usize {
        self.log.borrow().messages.len()
    }

    pub fn message(&self, index: usize) -> SubscribeForecastMessage {
        self.log.borrow().messages[index].clone()
    }

    /// Subscription indexes whose unsubscribe closure ran, in call order.
    pub fn unsubscribed(&self) -> Vec<usize> {
        self.log.borrow().unsubscribed.clone()
    }

    pub fn ack(&self, index: usize) {
        let sender = self.log.borrow_mut().acks[index].take();
        if let Some(sender) = sender {
            sender.send(()).expect("ack receiver alive");
        }
    }

    /// Drops a pending acknowledgment without resolving it.
    pub fn reject(&self, index: usize) {
        self.log.borrow_mut().acks[index].take();
    }

    /// Pushes a forecast through the callback of subscription `index`.
    pub fn push(&self, index: usize, forecast: Vec<ForecastRecord>) {
        let mut log = self.log.borrow_mut();
        (log.callbacks[index])(ForecastEvent { forecast });
    }
}

impl ForecastSource for RecordingSource {
    fn subscribe_forecast(
        &mut self,
        message: SubscribeForecastMessage,
        callback: ForecastCallback,
    ) -> PendingUnsubscribe {
        let mut log = self.log.borrow_mut();
        let index = log.messages.len();
        log.messages.push(message);
        log.callbacks.push(callback);

        let shared = Rc::clone(&self.log);
        let unsubscribe: Unsubscribe = Box::new(move || {
            shared.borrow_mut().unsubscribed.push(index);
        });

        if log.deferred {
            let (sender, receiver) = oneshot::channel();
            log.acks.push(Some(sender));
            async move {
                match receiver.await {
                    Ok(()) => Ok(unsubscribe),
                    Err(_) => Err(CardError::Subscription(
                        "acknowledgment dropped".to_owned(),
                    )),
                }
            }
            .boxed_local()
        } else {
            log.acks.push(None);
            futures::future::ready(Ok(unsubscribe)).boxed_local()
        }
    }
}

/// A card wired to in-memory host services, plus handles to drive them.
pub struct Harness {
    pub card: TestCard,
    pub source: RecordingSource,
    pub scheduler: ManualScheduler,
    pub clock: FixedClock,
    pub pool: LocalPool,
}

impl Harness {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self::with_parts(now, RecordingSource::new(), HeadlessSurface::mounted(CanvasId(1)))
    }

    pub fn with_parts(
        now: DateTime<FixedOffset>,
        source: RecordingSource,
        surface: HeadlessSurface,
    ) -> Self {
        let scheduler = ManualScheduler::new();
        let clock = FixedClock::new(now);
        let pool = LocalPool::new();
        let host = CardHost {
            source: Box::new(source.clone()),
            scheduler: Box::new(scheduler.clone()),
            clock: Box::new(clock.clone()),
            spawner: Box::new(pool.spawner()),
        };
        let card = WeatherCard::new(NullChartRenderer::default(), surface, host);
        Self {
            card,
            source,
            scheduler,
            clock,
            pool,
        }
    }

    /// Config, host state and forecasts applied, then the first update run.
    pub fn mounted(now: DateTime<FixedOffset>, config: CardConfig, records: Vec<ForecastRecord>) -> Self {
        let mut harness = Self::new(now);
        harness.card.set_config(config).expect("config accepted");
        harness
            .card
            .set_host_state(host_state(now))
            .expect("host state accepted");
        harness.card.set_forecasts(records);
        harness.card.update().expect("first update");
        harness
    }

    pub fn run_pending_tasks(&mut self) {
        self.pool.run_until_stalled();
    }
}

pub fn at(rfc3339: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(rfc3339).expect("valid timestamp")
}

pub fn weather_entity(features: WeatherFeatures, last_changed: DateTime<FixedOffset>) -> EntitySnapshot {
    EntitySnapshot::new("sunny", last_changed)
        .with_attribute("supported_features", features.0)
        .with_attribute("temperature", 21.4)
        .with_attribute("temperature_unit", "°C")
        .with_attribute("apparent_temperature", 19.0)
        .with_attribute("dew_point", 11.2)
        .with_attribute("pressure", 1013.25)
        .with_attribute("pressure_unit", "hPa")
        .with_attribute("wind_speed", 18.0)
        .with_attribute("wind_speed_unit", "km/h")
        .with_attribute("wind_bearing", 90.0)
        .with_attribute("humidity", 64)
        .with_attribute("uv_index", 3.24)
        .with_attribute("precipitation_unit", "mm")
}

pub fn all_features() -> WeatherFeatures {
    WeatherFeatures(WeatherFeatures::FORECAST_DAILY.0 | WeatherFeatures::FORECAST_HOURLY.0)
}

pub fn host_state(now: DateTime<FixedOffset>) -> HostState {
    HostState::default()
        .with_entity(WEATHER, weather_entity(all_features(), now))
        .with_language("en")
}

pub fn hourly_records(start: DateTime<FixedOffset>, count: usize) -> Vec<ForecastRecord> {
    (0..count)
        .map(|offset| {
            ForecastRecord::new(start + Duration::hours(offset as i64), 15.0 + offset as f64)
                .with_precipitation(0.2 * offset as f64)
                .with_precipitation_probability(10.0 * offset as f64)
                .with_wind(12.0, WindBearing::Degrees(180.0))
                .with_condition("cloudy")
        })
        .collect()
}

pub fn daily_records(start: DateTime<FixedOffset>, count: usize) -> Vec<ForecastRecord> {
    (0..count)
        .map(|offset| {
            ForecastRecord::new(start + Duration::days(offset as i64), 20.0 + offset as f64)
                .with_templow(10.0 + offset as f64)
                .with_precipitation(offset as f64)
                .with_precipitation_probability(20.0)
                .with_condition("rainy")
        })
        .collect()
}
