//! Contracts the card consumes from its host runtime.

mod clock;
mod entity;
mod scheduler;
mod source;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entity::{EntitySnapshot, HostState, WeatherFeatures};
pub use scheduler::{ManualScheduler, ScheduledKind, Scheduler, TimerId};
pub use source::{
    ForecastCallback, ForecastEvent, ForecastSource, PendingUnsubscribe, SUBSCRIBE_FORECAST_TYPE,
    SubscribeForecastMessage, Unsubscribe,
};

use futures::task::LocalSpawn;

/// Everything the card needs from the host besides rendering.
pub struct CardHost {
    pub source: Box<dyn ForecastSource>,
    pub scheduler: Box<dyn Scheduler>,
    pub clock: Box<dyn Clock>,
    /// Executor used to await subscription acknowledgments at teardown.
    pub spawner: Box<dyn LocalSpawn>,
}
