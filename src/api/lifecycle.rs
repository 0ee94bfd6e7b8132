use std::time::Duration;

use tracing::{debug, trace};

use crate::error::CardResult;
use crate::render::{ChartRenderer, ChartSurface};

use super::{RebuildOutcome, WeatherCard};

impl<R: ChartRenderer, S: ChartSurface> WeatherCard<R, S> {
    /// The card entered the document; resize handling attaches on the next turn.
    pub fn connected(&mut self) {
        if self.lifecycle.resize_attached || self.lifecycle.resize_attach.is_some() {
            return;
        }
        let timer = self.scheduler.set_timeout(Duration::ZERO);
        self.lifecycle.resize_attach = Some(timer);
        debug!(timer = timer.0, "scheduled resize attachment");
    }

    /// The card container was resized to `width` pixels of content.
    ///
    /// Returns `None` while resize handling is not attached yet.
    pub fn on_resize(&mut self, width: f64) -> CardResult<Option<RebuildOutcome>> {
        if !self.lifecycle.resize_attached {
            trace!(width, "resize before attachment ignored");
            return Ok(None);
        }
        self.container_width = Some(width);
        self.measure();
        self.rebuild_chart().map(Some)
    }

    /// The card left the document: releases the subscription, chart, clock,
    /// autoscroll timer and any pending resize attachment.
    ///
    /// Safe on a card that never mounted; a later `update` mounts it again.
    pub fn teardown(&mut self) {
        self.subscription.teardown();
        self.binding.destroy(self.scheduler.as_mut());
        self.clock.stop(self.scheduler.as_mut());
        self.clock_display = None;
        self.autoscroll.disable(self.scheduler.as_mut());
        if let Some(timer) = self.lifecycle.resize_attach.take() {
            self.scheduler.cancel(timer);
        }
        self.lifecycle.resize_attached = false;
        self.lifecycle.mounted = false;
        debug!("card torn down");
    }
}
