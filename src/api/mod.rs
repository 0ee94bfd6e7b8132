//! The weather card: configuration, derived display values and the
//! controller that keeps subscription, chart and timers in sync.

mod autoscroll;
mod card;
mod chart_binding;
mod chart_options;
mod clock;
mod conditions;
mod config;
mod config_controller;
mod data_controller;
mod forecast_rows;
mod lifecycle;
mod listener_registry;
mod subscription;
mod sync_controller;
mod timer_controller;

pub use autoscroll::{AutoscrollWindow, prune_stale};
pub use card::{CARD_SIZE, WeatherCard};
pub use chart_binding::{ChartBinding, RebuildOutcome};
pub use chart_options::{ChartInputs, build_chart_spec, precipitation_ceiling};
pub use clock::{ClockDisplay, ClockTicker};
pub use conditions::{CurrentConditions, Reading, SUN_ENTITY_ID, SunTimes, format_temperature};
pub use config::{AttributeOverrides, CardConfig, ChartStyle, ForecastConfig, IconStyle, UnitsConfig};
pub use config_controller::ConfigChange;
pub use forecast_rows::{
    ForecastColumn, ForecastRows, WeatherIcon, WindCell, WindUnits, forecast_rows,
    resolve_condition_icon,
};
pub use subscription::{ForecastSubscription, SubscribeOutcome, SubscriptionKey};
pub use sync_controller::{SyncAction, UpdateReport};
pub use timer_controller::TimerOutcome;
