use tracing::{debug, trace};

use crate::core::ForecastSeries;
use crate::error::CardResult;
use crate::host::{Scheduler, TimerId};
use crate::render::{CanvasId, ChartId, ChartRenderer, ChartSpec};

/// Result of a rebuild request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RebuildOutcome {
    Built(ChartId),
    /// The canvas is not mounted yet; the rebuild waits for this frame.
    Deferred(TimerId),
    /// Nothing to draw yet (no forecasts or no weather entity).
    Skipped,
}

/// Owns the single live chart of a card and the canvas retry frame.
pub struct ChartBinding<R: ChartRenderer> {
    renderer: R,
    handle: Option<ChartId>,
    pending_frame: Option<TimerId>,
}

impl<R: ChartRenderer> ChartBinding<R> {
    #[must_use]
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            handle: None,
            pending_frame: None,
        }
    }

    #[must_use]
    pub fn handle(&self) -> Option<ChartId> {
        self.handle
    }

    #[must_use]
    pub fn pending_frame(&self) -> Option<TimerId> {
        self.pending_frame
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Replaces the live chart with one built from `spec`.
    ///
    /// Without a canvas the request is parked on an animation frame and the
    /// current chart stays up. Repeated requests share the same frame.
    pub fn rebuild(
        &mut self,
        canvas: Option<CanvasId>,
        spec: &ChartSpec,
        scheduler: &mut dyn Scheduler,
    ) -> CardResult<RebuildOutcome> {
        let Some(canvas) = canvas else {
            let frame = match self.pending_frame {
                Some(frame) => frame,
                None => {
                    let frame = scheduler.request_animation_frame();
                    self.pending_frame = Some(frame);
                    frame
                }
            };
            debug!(frame = frame.0, "forecast canvas not mounted, deferring chart rebuild");
            return Ok(RebuildOutcome::Deferred(frame));
        };

        if let Some(frame) = self.pending_frame.take() {
            scheduler.cancel(frame);
        }
        if let Some(previous) = self.handle.take() {
            self.renderer.destroy_chart(previous);
        }

        let chart = self.renderer.create_chart(canvas, spec)?;
        self.handle = Some(chart);
        debug!(
            chart = chart.0,
            canvas = canvas.0,
            columns = spec.series.len(),
            "built forecast chart"
        );
        Ok(RebuildOutcome::Built(chart))
    }

    /// Swaps the series on the live chart. Returns `false` when there is none.
    pub fn patch(&mut self, series: &ForecastSeries) -> CardResult<bool> {
        let Some(chart) = self.handle else {
            trace!("no live chart to patch");
            return Ok(false);
        };
        self.renderer.update_chart(chart, series)?;
        trace!(chart = chart.0, columns = series.len(), "patched forecast chart");
        Ok(true)
    }

    /// Releases the chart and any parked rebuild. Safe to call repeatedly.
    pub fn destroy(&mut self, scheduler: &mut dyn Scheduler) {
        if let Some(frame) = self.pending_frame.take() {
            scheduler.cancel(frame);
        }
        if let Some(chart) = self.handle.take() {
            self.renderer.destroy_chart(chart);
            debug!(chart = chart.0, "destroyed forecast chart");
        }
    }

    /// Clears the parked frame if `id` is it, so the caller can retry the rebuild.
    pub fn take_frame(&mut self, id: TimerId) -> bool {
        if self.pending_frame == Some(id) {
            self.pending_frame = None;
            true
        } else {
            false
        }
    }
}
