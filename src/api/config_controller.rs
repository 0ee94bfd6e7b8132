use tracing::debug;

use crate::core::LayoutMetrics;
use crate::error::CardResult;
use crate::render::{ChartRenderer, ChartSurface};

use super::{CardConfig, WeatherCard};

/// Field-level difference between two configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConfigChange {
    /// No configuration existed before.
    pub initial: bool,
    pub entity: bool,
    pub granularity: bool,
    pub autoscroll: bool,
    pub show_time: bool,
    /// Anything at all differs.
    pub any: bool,
}

impl ConfigChange {
    #[must_use]
    pub fn between(previous: Option<&CardConfig>, next: &CardConfig) -> Self {
        let Some(previous) = previous else {
            return Self {
                initial: true,
                any: true,
                ..Self::default()
            };
        };

        Self {
            initial: false,
            entity: previous.entity != next.entity,
            granularity: previous.granularity() != next.granularity(),
            autoscroll: previous.autoscroll != next.autoscroll,
            show_time: previous.show_time != next.show_time,
            any: previous != next,
        }
    }

    /// Whether the forecast stream must be replaced.
    #[must_use]
    pub fn needs_resubscribe(self) -> bool {
        self.entity || self.granularity
    }
}

impl<R: ChartRenderer, S: ChartSurface> WeatherCard<R, S> {
    /// Replaces the configuration. Effects run on the next `update`.
    ///
    /// A config without an entity is rejected and leaves the card unchanged.
    pub fn set_config(&mut self, config: CardConfig) -> CardResult<ConfigChange> {
        let config = config.normalized()?;
        let change = ConfigChange::between(self.config.as_ref(), &config);
        debug!(
            entity_id = config.entity_id(),
            granularity = config.granularity().as_str(),
            entity_changed = change.entity,
            granularity_changed = change.granularity,
            "card config replaced"
        );

        let previous = self.config.replace(config);
        if !self.pending.config_replaced {
            self.pending.previous_config = previous;
            self.pending.config_replaced = true;
        }
        self.measure();
        Ok(change)
    }

    /// Parses and applies a JSON config.
    pub fn set_config_json(&mut self, json: &str) -> CardResult<ConfigChange> {
        self.set_config(CardConfig::from_json_str(json)?)
    }

    /// Re-derives column width and visible count from the current inputs.
    pub(super) fn measure(&mut self) {
        let Some(config) = self.config.as_ref() else {
            return;
        };
        let column_min_width = config.column_min_width();
        let configured = config.forecast.number_of_forecasts;

        self.layout = match self.container_width {
            Some(width) => LayoutMetrics::measure(width, column_min_width, configured),
            // Not measured yet: show everything unless a count is configured.
            None => LayoutMetrics {
                column_min_width,
                visible_item_count: if configured > 0 { configured } else { usize::MAX },
            },
        };
        debug!(
            column_min_width,
            visible_item_count = self.layout.visible_item_count,
            "measured forecast layout"
        );
    }
}
