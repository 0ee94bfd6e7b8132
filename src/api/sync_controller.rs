use chrono::Offset;
use tracing::{debug, warn};

use crate::core::{ForecastRecord, build_forecast_series};
use crate::error::{CardError, CardResult};
use crate::render::{ChartRenderer, ChartSurface};

use super::{
    CardConfig, ChartInputs, ClockDisplay, ConfigChange, RebuildOutcome, SubscribeOutcome,
    SubscriptionKey, WeatherCard, build_chart_spec,
};

/// One effect performed by an update cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    Resubscribed {
        key: SubscriptionKey,
        outcome: Option<SubscribeOutcome>,
    },
    Rebuilt(RebuildOutcome),
    /// `false` when there was no live chart to patch.
    Patched(bool),
    AutoscrollEnabled,
    AutoscrollDisabled,
    ClockStarted,
    ClockStopped,
}

/// What an update cycle did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateReport {
    pub actions: Vec<SyncAction>,
    /// Forecasts as they were before this cycle, when they changed.
    pub previous_forecasts: Option<Vec<ForecastRecord>>,
}

impl UpdateReport {
    #[must_use]
    pub fn rebuilt(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, SyncAction::Rebuilt(_)))
    }

    #[must_use]
    pub fn patched(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, SyncAction::Patched(true)))
    }

    #[must_use]
    pub fn resubscribed(&self) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, SyncAction::Resubscribed { .. }))
    }
}

impl<R: ChartRenderer, S: ChartSurface> WeatherCard<R, S> {
    /// Runs one update cycle.
    ///
    /// Order: drain pushed forecasts, prune stale records, configuration
    /// effects, then data effects. The first cycle mounts the card instead
    /// of applying configuration effects.
    pub fn update(&mut self) -> CardResult<UpdateReport> {
        if self.config.is_none() {
            return Err(CardError::NotConfigured);
        }

        self.drain_subscription();
        self.prune_forecasts();

        let pending = std::mem::take(&mut self.pending);
        let mut report = UpdateReport {
            actions: Vec::new(),
            previous_forecasts: pending.previous_forecasts,
        };

        if !self.lifecycle.mounted {
            self.mount(&mut report.actions)?;
            return Ok(report);
        }

        let mut rebuilt = false;
        if pending.config_replaced {
            let change = match self.config.as_ref() {
                Some(config) => ConfigChange::between(pending.previous_config.as_ref(), config),
                None => ConfigChange::default(),
            };
            self.apply_config_effects(change, &mut report.actions)?;
            rebuilt = true;
        }

        if pending.forecasts_replaced && !rebuilt {
            let action = if self.binding.handle().is_some() {
                SyncAction::Patched(self.patch_chart()?)
            } else {
                SyncAction::Rebuilt(self.rebuild_chart()?)
            };
            report.actions.push(action);
        }

        debug!(actions = report.actions.len(), "update cycle finished");
        Ok(report)
    }

    fn mount(&mut self, actions: &mut Vec<SyncAction>) -> CardResult<()> {
        // A stream opened before the entity was reconfigured belongs to the old key.
        if let Some(key) = self.config.as_ref().map(CardConfig::subscription_key)
            && self.subscription.key().is_some_and(|active| *active != key)
        {
            self.replace_subscription(key, actions);
        }

        self.measure();
        actions.push(SyncAction::Rebuilt(self.rebuild_chart()?));

        let (autoscroll, show_time) = match self.config.as_ref() {
            Some(config) => (config.autoscroll, config.show_time),
            None => (false, false),
        };
        if autoscroll {
            self.enable_autoscroll(actions);
        }
        if show_time {
            self.start_clock(actions);
        }

        self.lifecycle.mounted = true;
        debug!("card mounted");
        Ok(())
    }

    fn apply_config_effects(
        &mut self,
        change: ConfigChange,
        actions: &mut Vec<SyncAction>,
    ) -> CardResult<()> {
        let Some(config) = self.config.as_ref() else {
            return Ok(());
        };
        let (autoscroll, show_time) = (config.autoscroll, config.show_time);

        if change.needs_resubscribe() {
            let key = config.subscription_key();
            self.replace_subscription(key, actions);
        }

        self.measure();
        actions.push(SyncAction::Rebuilt(self.rebuild_chart()?));

        if change.autoscroll {
            if autoscroll {
                self.enable_autoscroll(actions);
            } else {
                self.autoscroll.disable(self.scheduler.as_mut());
                actions.push(SyncAction::AutoscrollDisabled);
            }
        }

        if change.show_time {
            if show_time {
                self.start_clock(actions);
            } else {
                self.clock.stop(self.scheduler.as_mut());
                self.clock_display = None;
                actions.push(SyncAction::ClockStopped);
            }
        }
        Ok(())
    }

    /// Moves the stream to `key`, or closes it while the entity is missing.
    fn replace_subscription(&mut self, key: SubscriptionKey, actions: &mut Vec<SyncAction>) {
        let features = self
            .host_state
            .as_ref()
            .and_then(|host| host.entity(&key.entity_id))
            .map(|weather| weather.supported_features());

        let outcome = match features {
            Some(features) => Some(self.subscription.resubscribe(key.clone(), features)),
            None => {
                warn!(entity_id = %key.entity_id, "weather entity missing, waiting for host state");
                self.subscription.teardown();
                None
            }
        };
        actions.push(SyncAction::Resubscribed { key, outcome });
    }

    fn enable_autoscroll(&mut self, actions: &mut Vec<SyncAction>) {
        let now = self.now();
        self.autoscroll.enable(self.scheduler.as_mut(), now);
        actions.push(SyncAction::AutoscrollEnabled);
    }

    fn start_clock(&mut self, actions: &mut Vec<SyncAction>) {
        self.tick_clock();
        if self.clock.start(self.scheduler.as_mut()) {
            actions.push(SyncAction::ClockStarted);
        }
    }

    pub(super) fn tick_clock(&mut self) -> Option<&ClockDisplay> {
        let show_seconds = self.config.as_ref()?.show_time_seconds;
        self.clock_display = Some(ClockDisplay::at(self.now(), self.locale(), show_seconds));
        self.clock_display.as_ref()
    }

    /// Rebuilds the chart from the current config, forecasts and layout.
    pub(super) fn rebuild_chart(&mut self) -> CardResult<RebuildOutcome> {
        let Some(config) = self.config.as_ref() else {
            return Ok(RebuildOutcome::Skipped);
        };
        let weather = self
            .host_state
            .as_ref()
            .and_then(|host| host.entity(config.entity_id()));
        let Some(weather) = weather.filter(|_| !self.forecasts.is_empty()) else {
            debug!(
                forecasts = self.forecasts.len(),
                "nothing to draw, skipping chart rebuild"
            );
            return Ok(RebuildOutcome::Skipped);
        };

        self.surface
            .set_chart_min_width(self.layout.chart_min_width(self.forecasts.len()));

        let series = build_forecast_series(
            &self.forecasts,
            self.layout.visible_item_count,
            config.series_options(),
        );
        let style = self.surface.style_tokens();
        let inputs = ChartInputs {
            config,
            weather,
            style: &style,
            direction: self.surface.text_direction(),
            locale: self.locale(),
            timezone: self.wall_clock.now().offset().fix(),
        };
        let spec = build_chart_spec(&inputs, series);

        let canvas = self.surface.forecast_canvas();
        self.binding.rebuild(canvas, &spec, self.scheduler.as_mut())
    }

    pub(super) fn patch_chart(&mut self) -> CardResult<bool> {
        if self.forecasts.is_empty() {
            return Ok(false);
        }
        self.binding.patch(&self.series())
    }
}
