use tracing::{debug, trace};

use crate::core::{ForecastRecord, is_chronological};
use crate::error::{CardError, CardResult};
use crate::host::HostState;
use crate::render::{ChartRenderer, ChartSurface};

use super::{SubscribeOutcome, WeatherCard, prune_stale};

impl<R: ChartRenderer, S: ChartSurface> WeatherCard<R, S> {
    /// Replaces the host state snapshot.
    ///
    /// Opens the forecast stream once the weather entity is present, unless
    /// one is already open or the entity lacks the capability.
    pub fn set_host_state(&mut self, state: HostState) -> CardResult<Option<SubscribeOutcome>> {
        let config = self.config.as_ref().ok_or(CardError::NotConfigured)?;
        let key = config.subscription_key();

        let outcome = match state.entity(&key.entity_id) {
            Some(weather) => {
                let features = weather.supported_features();
                self.subscription
                    .wants_subscription(&key, features)
                    .then(|| self.subscription.subscribe(key, features))
            }
            None => {
                trace!(entity_id = %key.entity_id, "weather entity not in host state");
                None
            }
        };

        self.host_state = Some(state);
        Ok(outcome)
    }

    /// Replaces the forecast records directly. Effects run on the next `update`.
    pub fn set_forecasts(&mut self, records: Vec<ForecastRecord>) {
        debug!(count = records.len(), "forecasts replaced");
        self.pending.replace_forecasts(&mut self.forecasts, records);
    }

    /// Moves the newest push of the active stream into the card.
    pub(super) fn drain_subscription(&mut self) -> bool {
        let Some(records) = self.subscription.take_latest() else {
            return false;
        };
        if !is_chronological(&records) {
            debug!(count = records.len(), "forecast push is not in chronological order");
        }
        trace!(count = records.len(), "forecast push applied");
        self.pending.replace_forecasts(&mut self.forecasts, records);
        true
    }

    /// Drops records older than the autoscroll cutoff when autoscroll is on.
    pub(super) fn prune_forecasts(&mut self) -> bool {
        let Some(config) = self.config.as_ref().filter(|config| config.autoscroll) else {
            return false;
        };
        let now = self.wall_clock.now();
        match prune_stale(&mut self.forecasts, now, config.granularity()) {
            Some(before) => {
                self.pending.record_forecasts_before(before);
                true
            }
            None => false,
        }
    }
}
