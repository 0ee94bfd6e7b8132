use indexmap::IndexMap;

use crate::core::ForecastSeries;
use crate::error::{CardError, CardResult};
use crate::render::{CanvasId, ChartId, ChartRenderer, ChartSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RendererCall {
    Create { chart: ChartId, canvas: CanvasId },
    Update { chart: ChartId },
    Destroy { chart: ChartId },
}

/// Renderer that keeps charts in memory, used by tests and headless hosts.
///
/// It still rejects invalid calls (updating or destroying an unknown chart,
/// binding two charts to one canvas) so lifecycle bugs surface in tests.
#[derive(Debug, Default)]
pub struct NullChartRenderer {
    next_id: u64,
    live: IndexMap<ChartId, (CanvasId, ChartSpec)>,
    calls: Vec<RendererCall>,
}

impl NullChartRenderer {
    #[must_use]
    pub fn calls(&self) -> &[RendererCall] {
        &self.calls
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn spec(&self, chart: ChartId) -> Option<&ChartSpec> {
        self.live.get(&chart).map(|(_, spec)| spec)
    }

    #[must_use]
    pub fn create_count(&self) -> usize {
        self.count(|call| matches!(call, RendererCall::Create { .. }))
    }

    #[must_use]
    pub fn update_count(&self) -> usize {
        self.count(|call| matches!(call, RendererCall::Update { .. }))
    }

    #[must_use]
    pub fn destroy_count(&self) -> usize {
        self.count(|call| matches!(call, RendererCall::Destroy { .. }))
    }

    fn count(&self, predicate: impl Fn(&RendererCall) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }
}

impl ChartRenderer for NullChartRenderer {
    fn create_chart(&mut self, canvas: CanvasId, spec: &ChartSpec) -> CardResult<ChartId> {
        if self.live.values().any(|(bound, _)| *bound == canvas) {
            return Err(CardError::Renderer(format!(
                "canvas {} already has a live chart",
                canvas.0
            )));
        }
        self.next_id += 1;
        let chart = ChartId(self.next_id);
        self.live.insert(chart, (canvas, spec.clone()));
        self.calls.push(RendererCall::Create { chart, canvas });
        Ok(chart)
    }

    fn update_chart(&mut self, chart: ChartId, series: &ForecastSeries) -> CardResult<()> {
        let (_, spec) = self
            .live
            .get_mut(&chart)
            .ok_or_else(|| CardError::Renderer(format!("chart {} is not live", chart.0)))?;
        spec.series = series.clone();
        self.calls.push(RendererCall::Update { chart });
        Ok(())
    }

    fn destroy_chart(&mut self, chart: ChartId) {
        if self.live.shift_remove(&chart).is_some() {
            self.calls.push(RendererCall::Destroy { chart });
        }
    }
}
