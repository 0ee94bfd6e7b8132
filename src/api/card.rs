use chrono::{DateTime, FixedOffset};

use crate::core::{
    CardLocale, ForecastRecord, ForecastSeries, Language, LayoutMetrics, RelativeAge,
    build_forecast_series,
};
use crate::extensions::CardEventListener;
use crate::host::{CardHost, Clock, HostState, Scheduler, TimerId};
use crate::render::{ChartId, ChartRenderer, ChartSurface};

use super::{
    AutoscrollWindow, CardConfig, ChartBinding, ClockDisplay, ClockTicker, CurrentConditions,
    ForecastRows, ForecastSubscription, SubscriptionKey, WindUnits, forecast_rows,
};

/// Layout rows a dashboard should reserve for the card.
pub const CARD_SIZE: u32 = 4;

/// Lifecycle flags of the mounted card.
#[derive(Debug, Default)]
pub(super) struct Lifecycle {
    /// Deferred resize-observer attachment scheduled by `connected`.
    pub(super) resize_attach: Option<TimerId>,
    pub(super) resize_attached: bool,
    /// Set by the first `update` after configuration.
    pub(super) mounted: bool,
}

/// Changes accumulated since the last `update`.
#[derive(Debug, Default)]
pub(super) struct PendingChanges {
    pub(super) config_replaced: bool,
    pub(super) previous_config: Option<CardConfig>,
    pub(super) forecasts_replaced: bool,
    /// Forecasts as they were before the first change of this cycle.
    pub(super) previous_forecasts: Option<Vec<ForecastRecord>>,
}

impl PendingChanges {
    pub(super) fn replace_forecasts(
        &mut self,
        forecasts: &mut Vec<ForecastRecord>,
        next: Vec<ForecastRecord>,
    ) {
        let before = std::mem::replace(forecasts, next);
        self.record_forecasts_before(before);
    }

    pub(super) fn record_forecasts_before(&mut self, before: Vec<ForecastRecord>) {
        if !self.forecasts_replaced {
            self.previous_forecasts = Some(before);
            self.forecasts_replaced = true;
        }
    }
}

/// A weather card: current conditions plus a live forecast chart.
///
/// All notifications are applied through `set_config`, `set_host_state`,
/// `on_resize` and `on_timer`; `update` then performs the resulting
/// subscription, chart, autoscroll and clock work in a fixed order.
pub struct WeatherCard<R: ChartRenderer, S: ChartSurface> {
    pub(super) config: Option<CardConfig>,
    pub(super) host_state: Option<HostState>,
    pub(super) forecasts: Vec<ForecastRecord>,
    pub(super) layout: LayoutMetrics,
    pub(super) container_width: Option<f64>,
    pub(super) surface: S,
    pub(super) binding: ChartBinding<R>,
    pub(super) subscription: ForecastSubscription,
    pub(super) autoscroll: AutoscrollWindow,
    pub(super) clock: ClockTicker,
    pub(super) clock_display: Option<ClockDisplay>,
    pub(super) scheduler: Box<dyn Scheduler>,
    pub(super) wall_clock: Box<dyn Clock>,
    pub(super) lifecycle: Lifecycle,
    pub(super) pending: PendingChanges,
    pub(super) listeners: Vec<Box<dyn CardEventListener>>,
}

impl<R: ChartRenderer, S: ChartSurface> WeatherCard<R, S> {
    #[must_use]
    pub fn new(renderer: R, surface: S, host: CardHost) -> Self {
        let CardHost {
            source,
            scheduler,
            clock,
            spawner,
        } = host;

        Self {
            config: None,
            host_state: None,
            forecasts: Vec::new(),
            layout: LayoutMetrics {
                column_min_width: 0.0,
                visible_item_count: 0,
            },
            container_width: None,
            surface,
            binding: ChartBinding::new(renderer),
            subscription: ForecastSubscription::new(source, spawner),
            autoscroll: AutoscrollWindow::new(),
            clock: ClockTicker::new(),
            clock_display: None,
            scheduler,
            wall_clock: clock,
            lifecycle: Lifecycle::default(),
            pending: PendingChanges::default(),
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> Option<&CardConfig> {
        self.config.as_ref()
    }

    #[must_use]
    pub fn host_state(&self) -> Option<&HostState> {
        self.host_state.as_ref()
    }

    #[must_use]
    pub fn forecasts(&self) -> &[ForecastRecord] {
        &self.forecasts
    }

    #[must_use]
    pub fn layout(&self) -> LayoutMetrics {
        self.layout
    }

    /// Number of forecast columns currently shown.
    #[must_use]
    pub fn forecast_items(&self) -> usize {
        self.layout.visible_item_count.min(self.forecasts.len())
    }

    #[must_use]
    pub fn column_min_width(&self) -> f64 {
        self.layout.column_min_width
    }

    /// Series for the visible window, as the chart receives it.
    #[must_use]
    pub fn series(&self) -> ForecastSeries {
        let options = self
            .config
            .as_ref()
            .map(CardConfig::series_options)
            .unwrap_or_default();
        build_forecast_series(&self.forecasts, self.layout.visible_item_count, options)
    }

    #[must_use]
    pub fn clock_display(&self) -> Option<&ClockDisplay> {
        self.clock_display.as_ref()
    }

    #[must_use]
    pub fn conditions(&self) -> Option<CurrentConditions> {
        CurrentConditions::derive(self.config.as_ref()?, self.host_state.as_ref()?)
    }

    /// Condition icons and wind cells under the chart.
    #[must_use]
    pub fn forecast_rows(&self) -> ForecastRows {
        let (Some(config), Some(host)) = (self.config.as_ref(), self.host_state.as_ref()) else {
            return ForecastRows::default();
        };
        let Some(weather) = host.entity(config.entity_id()) else {
            return ForecastRows::default();
        };
        let conditions = CurrentConditions::derive(config, host);
        let sun = conditions.as_ref().and_then(|conditions| conditions.sun.as_ref());
        let display_speed = conditions
            .as_ref()
            .and_then(|conditions| conditions.speed_unit.as_deref());

        forecast_rows(
            &self.forecasts,
            self.layout,
            config,
            sun,
            WindUnits {
                source: weather.attribute_str("wind_speed_unit"),
                display: display_speed,
            },
        )
    }

    /// "2 hours ago"-style age of the weather entity, when enabled.
    #[must_use]
    pub fn last_changed_label(&self) -> Option<String> {
        let config = self.config.as_ref().filter(|config| config.show_last_changed)?;
        let weather = self.host_state.as_ref()?.entity(config.entity_id())?;
        let age = RelativeAge::between(weather.last_changed, self.now());
        Some(self.locale().relative_age(age))
    }

    #[must_use]
    pub fn card_size(&self) -> u32 {
        CARD_SIZE
    }

    #[must_use]
    pub fn subscription_key(&self) -> Option<&SubscriptionKey> {
        self.subscription.key()
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_active()
    }

    #[must_use]
    pub fn chart_handle(&self) -> Option<ChartId> {
        self.binding.handle()
    }

    #[must_use]
    pub fn is_autoscroll_armed(&self) -> bool {
        self.autoscroll.is_armed()
    }

    #[must_use]
    pub fn is_clock_running(&self) -> bool {
        self.clock.is_running()
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        self.binding.renderer()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Active language: the configured locale, else the host's languages.
    #[must_use]
    pub fn locale(&self) -> CardLocale {
        let config = self.config.as_ref();
        let host = self.host_state.as_ref();
        let tag = config
            .and_then(|config| config.locale.as_deref())
            .or_else(|| host.and_then(|host| host.selected_language.as_deref()))
            .or_else(|| host.and_then(|host| host.language.as_deref()));

        CardLocale::new(
            tag.map(Language::from_tag).unwrap_or_default(),
            config.is_some_and(|config| config.use_12hour_format),
        )
    }

    pub(super) fn now(&self) -> DateTime<FixedOffset> {
        self.wall_clock.now()
    }
}
