use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::CardLocale;
use crate::host::{Scheduler, TimerId};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// 1 Hz driver for the digital clock.
#[derive(Debug, Default)]
pub struct ClockTicker {
    interval: Option<TimerId>,
}

impl ClockTicker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    #[must_use]
    pub fn owns(&self, id: TimerId) -> bool {
        self.interval == Some(id)
    }

    /// Starts ticking. Returns `false` when already running.
    pub fn start(&mut self, scheduler: &mut dyn Scheduler) -> bool {
        if self.interval.is_some() {
            return false;
        }
        let interval = scheduler.set_interval(TICK_PERIOD);
        self.interval = Some(interval);
        debug!(timer = interval.0, "clock started");
        true
    }

    pub fn stop(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(interval) = self.interval.take() {
            scheduler.cancel(interval);
            debug!(timer = interval.0, "clock stopped");
        }
    }
}

/// Text substituted into the clock area on every tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockDisplay {
    pub time: String,
    /// Uppercased long weekday.
    pub day: String,
    pub date: String,
}

impl ClockDisplay {
    #[must_use]
    pub fn at(now: DateTime<FixedOffset>, locale: CardLocale, show_seconds: bool) -> Self {
        Self {
            time: locale.clock_time(now, show_seconds),
            day: locale.weekday_long(now),
            date: locale.long_date(now),
        }
    }
}
