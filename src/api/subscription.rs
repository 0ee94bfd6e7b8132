use futures::channel::mpsc::{UnboundedReceiver, UnboundedSender, unbounded};
use futures::task::{LocalSpawn, LocalSpawnExt};
use tracing::{debug, error, trace, warn};

use crate::core::{ForecastRecord, Granularity};
use crate::host::{
    ForecastEvent, ForecastSource, PendingUnsubscribe, SubscribeForecastMessage, WeatherFeatures,
};

/// Identity of a forecast stream: which entity, which bucket size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriptionKey {
    pub entity_id: String,
    pub granularity: Granularity,
}

impl SubscriptionKey {
    #[must_use]
    pub fn new(entity_id: &str, granularity: Granularity) -> Self {
        Self {
            entity_id: entity_id.to_owned(),
            granularity,
        }
    }

    #[must_use]
    pub fn required_feature(&self) -> WeatherFeatures {
        match self.granularity {
            Granularity::Hourly => WeatherFeatures::FORECAST_HOURLY,
            Granularity::Daily => WeatherFeatures::FORECAST_DAILY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Subscribed { generation: u64 },
    /// The entity lacks the capability; nothing was subscribed.
    Unsupported,
}

struct FeedMessage {
    generation: u64,
    records: Vec<ForecastRecord>,
}

struct ActiveSubscription {
    key: SubscriptionKey,
    generation: u64,
    pending: PendingUnsubscribe,
}

enum SubscriptionState {
    Idle,
    Unsupported(SubscriptionKey),
    Active(ActiveSubscription),
}

/// Owns the single forecast push stream of a card.
///
/// Pushes are queued on a channel tagged with the generation of the stream
/// that produced them; pushes from a replaced stream are dropped on drain.
pub struct ForecastSubscription {
    source: Box<dyn ForecastSource>,
    spawner: Box<dyn LocalSpawn>,
    state: SubscriptionState,
    generation: u64,
    sender: UnboundedSender<FeedMessage>,
    receiver: UnboundedReceiver<FeedMessage>,
}

impl ForecastSubscription {
    #[must_use]
    pub fn new(source: Box<dyn ForecastSource>, spawner: Box<dyn LocalSpawn>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            source,
            spawner,
            state: SubscriptionState::Idle,
            generation: 0,
            sender,
            receiver,
        }
    }

    #[must_use]
    pub fn key(&self) -> Option<&SubscriptionKey> {
        match &self.state {
            SubscriptionState::Active(active) => Some(&active.key),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.state, SubscriptionState::Active(_))
    }

    /// Whether a host update should attempt to subscribe `key`.
    ///
    /// An unsupported key is retried only once the entity gains the capability.
    /// An open stream for another key is always replaced.
    #[must_use]
    pub fn wants_subscription(&self, key: &SubscriptionKey, features: WeatherFeatures) -> bool {
        match &self.state {
            SubscriptionState::Idle => true,
            SubscriptionState::Unsupported(rejected) => {
                rejected != key || features.supports(key.required_feature())
            }
            SubscriptionState::Active(active) => active.key != *key,
        }
    }

    /// Opens the stream for `key`, replacing any active stream first.
    pub fn subscribe(&mut self, key: SubscriptionKey, features: WeatherFeatures) -> SubscribeOutcome {
        self.teardown();

        if !features.supports(key.required_feature()) {
            error!(
                entity_id = %key.entity_id,
                granularity = key.granularity.as_str(),
                "weather entity does not support this forecast type"
            );
            self.state = SubscriptionState::Unsupported(key);
            return SubscribeOutcome::Unsupported;
        }

        self.generation += 1;
        let generation = self.generation;
        let sender = self.sender.clone();
        let callback = Box::new(move |event: ForecastEvent| {
            trace!(generation, count = event.forecast.len(), "forecast push");
            let message = FeedMessage {
                generation,
                records: event.forecast,
            };
            if sender.unbounded_send(message).is_err() {
                warn!(generation, "dropping forecast push after card was dropped");
            }
        });

        let message = SubscribeForecastMessage::new(&key.entity_id, key.granularity);
        let pending = self.source.subscribe_forecast(message, callback);
        debug!(
            entity_id = %key.entity_id,
            granularity = key.granularity.as_str(),
            generation,
            "subscribed to forecast"
        );
        self.state = SubscriptionState::Active(ActiveSubscription {
            key,
            generation,
            pending,
        });
        SubscribeOutcome::Subscribed { generation }
    }

    /// Closes the current stream, then opens one for `key`.
    ///
    /// `subscribe` already tears the old stream down first.
    pub fn resubscribe(&mut self, key: SubscriptionKey, features: WeatherFeatures) -> SubscribeOutcome {
        self.subscribe(key, features)
    }

    /// Closes the current stream, if any.
    ///
    /// The unsubscribe closure only exists once the host acknowledged the
    /// subscription, so the call is chained onto that acknowledgment.
    pub fn teardown(&mut self) {
        let state = std::mem::replace(&mut self.state, SubscriptionState::Idle);
        let SubscriptionState::Active(active) = state else {
            return;
        };

        let ActiveSubscription {
            key,
            generation,
            pending,
        } = active;
        let entity_id = key.entity_id;
        let task = async move {
            match pending.await {
                Ok(unsubscribe) => {
                    unsubscribe();
                    debug!(%entity_id, generation, "unsubscribed from forecast");
                }
                Err(err) => {
                    warn!(%entity_id, generation, error = %err, "forecast subscription was never acknowledged");
                }
            }
        };

        if let Err(err) = self.spawner.spawn_local(task) {
            warn!(error = %err, generation, "executor rejected forecast unsubscribe task");
        }
    }

    /// Latest push from the active stream since the previous call.
    pub fn take_latest(&mut self) -> Option<Vec<ForecastRecord>> {
        let current = match &self.state {
            SubscriptionState::Active(active) => Some(active.generation),
            _ => None,
        };

        let mut latest = None;
        while let Ok(Some(message)) = self.receiver.try_next() {
            if Some(message.generation) == current {
                latest = Some(message.records);
            } else {
                trace!(generation = message.generation, "dropping push from replaced stream");
            }
        }
        latest
    }
}
