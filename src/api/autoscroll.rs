use chrono::{DateTime, FixedOffset};
use tracing::{debug, warn};

use crate::core::{ForecastRecord, Granularity, autoscroll_cutoff, next_hour_boundary, stale_prefix_len};
use crate::host::{Scheduler, TimerId};

/// Hourly wake-up that keeps the forecast window current.
///
/// The timer only requests a redraw; pruning happens in the update cycle
/// through [`prune_stale`].
#[derive(Debug, Default)]
pub struct AutoscrollWindow {
    timer: Option<TimerId>,
}

impl AutoscrollWindow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.timer.is_some()
    }

    #[must_use]
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Arms the timer for the next hour boundary. No-op while armed.
    pub fn enable(&mut self, scheduler: &mut dyn Scheduler, now: DateTime<FixedOffset>) {
        if self.timer.is_some() {
            return;
        }
        self.arm(scheduler, now);
    }

    /// Cancels the pending timer. No-op while inactive.
    pub fn disable(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(timer) = self.timer.take() {
            scheduler.cancel(timer);
            debug!(timer = timer.0, "autoscroll disabled");
        }
    }

    /// Handles a fired timer. Returns `true` when `id` was ours; the window is
    /// then re-armed for the following hour and the caller should redraw.
    pub fn on_timer(
        &mut self,
        id: TimerId,
        scheduler: &mut dyn Scheduler,
        now: DateTime<FixedOffset>,
    ) -> bool {
        if self.timer != Some(id) {
            return false;
        }
        self.timer = None;
        self.arm(scheduler, now);
        true
    }

    fn arm(&mut self, scheduler: &mut dyn Scheduler, now: DateTime<FixedOffset>) {
        let boundary = next_hour_boundary(now);
        let delay = match (boundary - now).to_std() {
            Ok(delay) => delay,
            Err(err) => {
                warn!(error = %err, "hour boundary is not ahead of now, firing immediately");
                std::time::Duration::ZERO
            }
        };
        let timer = scheduler.set_timeout(delay);
        self.timer = Some(timer);
        debug!(timer = timer.0, delay_ms = delay.as_millis() as u64, %boundary, "autoscroll armed");
    }
}

/// Drops the stale leading records, returning the untouched input as the
/// "before" snapshot when anything was removed.
pub fn prune_stale(
    records: &mut Vec<ForecastRecord>,
    now: DateTime<FixedOffset>,
    granularity: Granularity,
) -> Option<Vec<ForecastRecord>> {
    let cutoff = autoscroll_cutoff(now, granularity);
    let stale = stale_prefix_len(records, cutoff);
    if stale == 0 {
        return None;
    }

    let before = std::mem::take(records);
    *records = before[stale..].to_vec();
    debug!(
        removed = stale,
        remaining = records.len(),
        %cutoff,
        "pruned stale forecasts"
    );
    Some(before)
}
