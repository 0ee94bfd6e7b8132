use tracing::{debug, trace};

use crate::error::CardResult;
use crate::host::TimerId;
use crate::render::{ChartRenderer, ChartSurface};

use super::{ClockDisplay, RebuildOutcome, UpdateReport, WeatherCard};

/// What a fired timer meant to the card.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerOutcome {
    /// Layout notifications are accepted from now on.
    ResizeAttached,
    ClockTick(Option<ClockDisplay>),
    /// The autoscroll window re-armed and ran an update cycle.
    Autoscroll(UpdateReport),
    /// A parked chart rebuild was retried.
    CanvasRetry(RebuildOutcome),
    /// Not a timer this card owns.
    Unknown,
}

impl<R: ChartRenderer, S: ChartSurface> WeatherCard<R, S> {
    /// Routes a fired timer to the component that scheduled it.
    pub fn on_timer(&mut self, id: TimerId) -> CardResult<TimerOutcome> {
        if self.lifecycle.resize_attach == Some(id) {
            self.lifecycle.resize_attach = None;
            self.lifecycle.resize_attached = true;
            debug!("resize notifications attached");
            return Ok(TimerOutcome::ResizeAttached);
        }

        if self.clock.owns(id) {
            trace!("clock tick");
            return Ok(TimerOutcome::ClockTick(self.tick_clock().cloned()));
        }

        let now = self.now();
        if self.autoscroll.on_timer(id, self.scheduler.as_mut(), now) {
            debug!("autoscroll window elapsed");
            return self.update().map(TimerOutcome::Autoscroll);
        }

        if self.binding.take_frame(id) {
            debug!("retrying deferred chart rebuild");
            return self.rebuild_chart().map(TimerOutcome::CanvasRetry);
        }

        trace!(timer = id.0, "ignoring unknown timer");
        Ok(TimerOutcome::Unknown)
    }
}
